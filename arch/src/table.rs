use bimap::BiMap;
use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use crate::op::{OpKind, OperandKind, OPCODE_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mnemonic {
    pub kind: OpKind,
    pub opcode: u8,
    pub operand: OperandKind,
}

impl Mnemonic {
    pub fn of(kind: OpKind) -> Self {
        Mnemonic {
            kind,
            opcode: kind.opcode(),
            operand: kind.operand(),
        }
    }

    pub fn name(&self) -> String {
        self.kind.to_string()
    }
}

/// Definitions indexed by opcode, every opcode assigned exactly once.
#[derive(Debug)]
pub struct InstTable {
    defs: Vec<Mnemonic>,
}

impl InstTable {
    pub fn build<I: IntoIterator<Item = OpKind>>(kinds: I) -> Result<Self, String> {
        let mut names = BiMap::new();
        let mut defs = vec![];
        for kind in kinds {
            let def = Mnemonic::of(kind);
            if def.opcode > OPCODE_MAX {
                return Err(format!("Opcode of `{}` out of range: 0x{:X}", kind, def.opcode));
            }
            names
                .insert_no_overwrite(def.name(), def.opcode)
                .map_err(|(name, code)| format!("Duplicate entry: `{}` = 0x{:X}", name, code))?;
            defs.push(def);
        }
        if let Some(code) = (0..=OPCODE_MAX).find(|code| !names.contains_right(code)) {
            return Err(format!("Opcode 0x{:X} is not assigned", code));
        }
        defs.sort_by_key(|def| def.opcode);
        Ok(InstTable { defs })
    }

    pub fn lookup(&self, name: &str) -> Option<&Mnemonic> {
        let kind = OpKind::parse(name).ok()?;
        self.by_opcode(kind.opcode())
    }

    pub fn by_opcode(&self, code: u8) -> Option<&Mnemonic> {
        self.defs.get(code as usize)
    }
}

pub static TABLE: Lazy<InstTable> = Lazy::new(|| {
    InstTable::build(OpKind::iter()).unwrap_or_else(|msg| panic!("Broken instruction table: {msg}"))
});

pub fn lookup(name: &str) -> Option<&'static Mnemonic> {
    TABLE.lookup(name)
}
