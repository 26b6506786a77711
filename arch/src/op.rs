use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString};

/// Width of the operand field in bits.
pub const OPERAND_BITS: u32 = 4;
/// Largest value the operand field can hold.
pub const OPERAND_MAX: u8 = (1 << OPERAND_BITS) - 1;
/// Largest opcode.
pub const OPCODE_MAX: u8 = 0x0F;

// Discriminant is the opcode.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OpKind {
    LDAM,
    LDBM,
    STAM,
    LDAC,
    LDBC,
    LDAP,
    LDAI,
    LDBI,
    STAI,
    BR,
    BRZ,
    BRN,
    BRB,
    ADD,
    SUB,
    PFX,
}

impl OpKind {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    pub fn opcode(self) -> u8 {
        self.into()
    }
}

/// Shape of the operand an instruction takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    None,
    Imm4,
    Addr4,
}

impl OpKind {
    pub fn operand(&self) -> OperandKind {
        use OpKind::*;
        match self {
            LDAM => OperandKind::Addr4,
            LDBM => OperandKind::Addr4,
            STAM => OperandKind::Addr4,
            LDAC => OperandKind::Imm4,
            LDBC => OperandKind::Imm4,
            LDAP => OperandKind::Addr4,
            LDAI => OperandKind::Imm4,
            LDBI => OperandKind::Imm4,
            STAI => OperandKind::Imm4,
            BR => OperandKind::Addr4,
            BRZ => OperandKind::Addr4,
            BRN => OperandKind::Addr4,
            BRB => OperandKind::None,
            ADD => OperandKind::None,
            SUB => OperandKind::None,
            PFX => OperandKind::Imm4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(OpKind::parse("ldam"), Ok(OpKind::LDAM));
        assert_eq!(OpKind::parse("BRZ"), Ok(OpKind::BRZ));
        assert_eq!(OpKind::parse("Pfx"), Ok(OpKind::PFX));
        assert!(OpKind::parse("hoge").is_err());
        assert!(OpKind::parse("").is_err());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(OpKind::STAI.to_string(), "stai");
        assert_eq!(OpKind::BR.to_string(), "br");
    }

    #[test]
    fn opcode_matches_discriminant() {
        assert_eq!(OpKind::LDAM.opcode(), 0x0);
        assert_eq!(OpKind::LDAC.opcode(), 0x3);
        assert_eq!(OpKind::BR.opcode(), 0x9);
        assert_eq!(OpKind::PFX.opcode(), OPCODE_MAX);
        assert_eq!(OpKind::try_from(0x0Du8).ok(), Some(OpKind::ADD));
        assert!(OpKind::try_from(0x10u8).is_err());
    }

    #[test]
    fn operand_shapes() {
        assert_eq!(OpKind::ADD.operand(), OperandKind::None);
        assert_eq!(OpKind::SUB.operand(), OperandKind::None);
        assert_eq!(OpKind::BRB.operand(), OperandKind::None);
        assert_eq!(OpKind::LDBC.operand(), OperandKind::Imm4);
        assert_eq!(OpKind::BRN.operand(), OperandKind::Addr4);
    }
}
