/// Strategies the P/L service reports, in table column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    LongCall,
    LongPut,
    CoveredCall,
    ProtectivePut,
    Straddle,
    Strangle,
    BullCallSpread,
    BearPutSpread,
    IronCondor,
    ButterflySpread,
}

impl Strategy {
    pub fn all() -> &'static [(Self, &'static str)] {
        &[
            (Self::LongCall, "Long Call"),
            (Self::LongPut, "Long Put"),
            (Self::CoveredCall, "Covered Call"),
            (Self::ProtectivePut, "Protective Put"),
            (Self::Straddle, "Straddle"),
            (Self::Strangle, "Strangle"),
            (Self::BullCallSpread, "Bull Call Spread"),
            (Self::BearPutSpread, "Bear Put Spread"),
            (Self::IronCondor, "Iron Condor"),
            (Self::ButterflySpread, "Butterfly Spread"),
        ]
    }

    /// Key used by the server in each strategy row.
    pub fn id(self) -> &'static str {
        match self {
            Self::LongCall => "LongCall",
            Self::LongPut => "LongPut",
            Self::CoveredCall => "CoveredCall",
            Self::ProtectivePut => "ProtectivePut",
            Self::Straddle => "Straddle",
            Self::Strangle => "Strangle",
            Self::BullCallSpread => "BullCallSpread",
            Self::BearPutSpread => "BearPutSpread",
            Self::IronCondor => "IronCondor",
            Self::ButterflySpread => "ButterflySpread",
        }
    }
}
