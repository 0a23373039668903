//! Instruction Disassembler for the LS-8.
//!
//! Converts decoded instructions and raw program images into assembly text
//! for debug tracing, listings, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use ls8_core::isa::{Instruction, Opcode};
//! use ls8_core::isa::disasm::disassemble;
//!
//! let text = disassemble(&Instruction::new(Opcode::Ldi, [0, 8]));
//! assert_eq!(text, "LDI R0,8");
//! ```

use super::decode::decode;
use super::instruction::{Instruction, Opcode};

/// Disassembles a decoded instruction.
///
/// Register operands are rendered as `R<n>` and immediates in decimal,
/// e.g. `"LDI R0,8"`, `"ADD R0,R1"`, `"PRN R0"`, `"RET"`.
pub fn disassemble(inst: &Instruction) -> String {
    let m = inst.opcode.mnemonic();
    match inst.opcode {
        Opcode::Ldi => format!("{m} R{},{}", inst.a(), inst.b()),
        Opcode::Add | Opcode::Mul => format!("{m} R{},R{}", inst.a(), inst.b()),
        Opcode::Prn | Opcode::Push | Opcode::Pop | Opcode::Call => format!("{m} R{}", inst.a()),
        Opcode::Ret | Opcode::Halt => m.to_owned(),
    }
}

/// One line of a program listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingLine {
    /// Address of the first byte covered by this line.
    pub addr: u8,
    /// The bytes covered by this line.
    pub bytes: Vec<u8>,
    /// Assembly text, or a `.byte` directive for data.
    pub text: String,
}

/// Disassembles a program image linearly from address 0.
///
/// Bytes that do not decode (unknown opcodes, or an instruction truncated by
/// the end of the image) are emitted as `.byte` directives and the walk
/// continues with the next byte. Images longer than memory are cut at 256 bytes.
pub fn disassemble_image(image: &[u8]) -> Vec<ListingLine> {
    let image = &image[..image.len().min(usize::from(u8::MAX) + 1)];
    let mut lines = Vec::new();
    let mut addr = 0usize;

    while addr < image.len() {
        let pc = addr as u8;
        let line = match decode(image, pc) {
            Ok(inst) => ListingLine {
                addr: pc,
                bytes: image[addr..addr + inst.encoded_len()].to_vec(),
                text: disassemble(&inst),
            },
            Err(_) => ListingLine {
                addr: pc,
                bytes: vec![image[addr]],
                text: format!(".byte {:#010b}", image[addr]),
            },
        };
        addr += line.bytes.len();
        lines.push(line);
    }

    lines
}
