use arch::{
    inst::Inst,
    op::{OperandKind, OPERAND_BITS, OPERAND_MAX},
    table,
};

use crate::{
    error::{AsmError, Error},
    label::Labels,
    parser::{Imm, Line},
};

/// Second pass: encode every addressed line. Errors from all lines are returned together.
pub fn encode(lines: &[Line], labels: &Labels) -> Result<Vec<u8>, Vec<AsmError>> {
    let mut words = vec![];
    let mut errors = vec![];
    for line in lines {
        match encode_line(line, labels) {
            Ok(Some(word)) => words.push(word),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }
    if errors.is_empty() {
        Ok(words)
    } else {
        Err(errors)
    }
}

/// Encode one line. Label-only lines give `None`.
pub fn encode_line(line: &Line, labels: &Labels) -> Result<Option<u8>, AsmError> {
    let Some(op) = &line.op else {
        return Ok(None);
    };
    let err = |kind: Error| AsmError::new(line.line_no, kind);

    if line.is_data() {
        let arg = line
            .arg
            .as_ref()
            .ok_or_else(|| err(Error::MissingOperand(op.clone())))?;
        let value = arg.resolve(labels).map_err(err)?;
        return u8::try_from(value)
            .map(Some)
            .map_err(|_| err(Error::OperandOutOfRange(value, u8::BITS)));
    }

    let def = table::lookup(op).ok_or_else(|| err(Error::UnknownMnemonic(op.clone())))?;
    let operand = match (def.operand, &line.arg) {
        (OperandKind::None, None) => 0,
        (OperandKind::None, Some(arg)) => {
            return Err(err(Error::UnexpectedOperand(op.clone(), arg.to_string())))
        }
        (_, None) => return Err(err(Error::MissingOperand(op.clone()))),
        (_, Some(Imm::Literal(value))) => match u8::try_from(*value) {
            Ok(v) if v <= OPERAND_MAX => v,
            _ => return Err(err(Error::OperandOutOfRange(*value, OPERAND_BITS))),
        },
        (_, Some(Imm::Ident(name))) => match labels.get(name) {
            Some(addr) if addr <= OPERAND_MAX => addr,
            Some(addr) => return Err(err(Error::AddressOutOfRange(name.clone(), addr))),
            None => return Err(err(Error::UndefinedSymbol(name.clone()))),
        },
    };

    Ok(Some(Inst::new(def.kind, operand).to_bin()))
}
