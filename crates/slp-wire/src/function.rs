/// SLPv2 function identifiers (RFC 2608 §8).
///
/// The harness only builds `SrvRqst` and `SrvTypeRqst` messages, but the
/// full table is kept so decoded headers name what they carry. Values
/// outside the table are preserved by `Unknown(u8)` so a probe can put any
/// byte in the function slot and still re-encode it unchanged.
///
/// ```text
/// ┌──────┬──────────────┬──────────────────────────────────┐
/// │ Wire │ Variant      │ Description                      │
/// ├──────┼──────────────┼──────────────────────────────────┤
/// │ 0x01 │ SrvRqst      │ Service request                  │
/// │ 0x02 │ SrvRply      │ Service reply                    │
/// │ 0x03 │ SrvReg       │ Service registration             │
/// │ 0x04 │ SrvDeReg     │ Service deregistration           │
/// │ 0x05 │ SrvAck       │ Service acknowledgement          │
/// │ 0x06 │ AttrRqst     │ Attribute request                │
/// │ 0x07 │ AttrRply     │ Attribute reply                  │
/// │ 0x08 │ DaAdvert     │ Directory agent advertisement    │
/// │ 0x09 │ SrvTypeRqst  │ Service type request             │
/// │ 0x0A │ SrvTypeRply  │ Service type reply               │
/// │ 0x0B │ SaAdvert     │ Service agent advertisement      │
/// └──────┴──────────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionId {
    SrvRqst,
    SrvRply,
    SrvReg,
    SrvDeReg,
    SrvAck,
    AttrRqst,
    AttrRply,
    DaAdvert,
    SrvTypeRqst,
    SrvTypeRply,
    SaAdvert,
    /// Any byte outside the RFC table, kept as-is.
    Unknown(u8),
}

impl FunctionId {
    /// Return the single-byte wire ID for this function.
    pub fn wire_id(self) -> u8 {
        match self {
            Self::SrvRqst => 0x01,
            Self::SrvRply => 0x02,
            Self::SrvReg => 0x03,
            Self::SrvDeReg => 0x04,
            Self::SrvAck => 0x05,
            Self::AttrRqst => 0x06,
            Self::AttrRply => 0x07,
            Self::DaAdvert => 0x08,
            Self::SrvTypeRqst => 0x09,
            Self::SrvTypeRply => 0x0A,
            Self::SaAdvert => 0x0B,
            Self::Unknown(id) => id,
        }
    }

    /// Parse a wire byte into a [`FunctionId`].
    pub fn from_wire_id(id: u8) -> Self {
        match id {
            0x01 => Self::SrvRqst,
            0x02 => Self::SrvRply,
            0x03 => Self::SrvReg,
            0x04 => Self::SrvDeReg,
            0x05 => Self::SrvAck,
            0x06 => Self::AttrRqst,
            0x07 => Self::AttrRply,
            0x08 => Self::DaAdvert,
            0x09 => Self::SrvTypeRqst,
            0x0A => Self::SrvTypeRply,
            0x0B => Self::SaAdvert,
            other => Self::Unknown(other),
        }
    }

    /// Short protocol name, as `slptool` and packet dissectors print it.
    pub fn name(self) -> &'static str {
        match self {
            Self::SrvRqst => "SrvRqst",
            Self::SrvRply => "SrvRply",
            Self::SrvReg => "SrvReg",
            Self::SrvDeReg => "SrvDeReg",
            Self::SrvAck => "SrvAck",
            Self::AttrRqst => "AttrRqst",
            Self::AttrRply => "AttrRply",
            Self::DaAdvert => "DAAdvert",
            Self::SrvTypeRqst => "SrvTypeRqst",
            Self::SrvTypeRply => "SrvTypeRply",
            Self::SaAdvert => "SAAdvert",
            Self::Unknown(_) => "Unknown",
        }
    }
}
