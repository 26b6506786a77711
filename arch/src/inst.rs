use crate::op::{OpKind, OperandKind, OPERAND_MAX};

use color_print::cformat;

/// One machine word: opcode in the high nibble, operand in the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inst {
    pub kind: OpKind,
    pub operand: u8,
}

impl Inst {
    pub fn new(kind: OpKind, operand: u8) -> Self {
        Inst {
            kind,
            operand: operand & OPERAND_MAX,
        }
    }

    pub fn to_bin(self) -> u8 {
        (self.kind.opcode() << 4) | self.operand
    }

    pub fn from_bin(bin: u8) -> Inst {
        match OpKind::try_from(bin >> 4) {
            Ok(kind) => Inst::new(kind, bin),
            Err(_) => unreachable!("opcode is a single nibble"),
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        match self.kind.operand() {
            OperandKind::None => cformat!("<r>{:<5}</>", self.kind),
            OperandKind::Imm4 => cformat!("<r>{:<5}</><y>0x{:X}</>", self.kind, self.operand),
            OperandKind::Addr4 => cformat!("<r>{:<5}</><b>0x{:X}</>", self.kind, self.operand),
        }
    }
}
