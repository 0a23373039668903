//! # Execution Loop Tests
//!
//! Fetch-decode-execute behaviour: PC advancement, state transitions,
//! fault reporting, step budgets and execution statistics.

use std::io;

use ls8_core::common::constants::DEFAULT_STACK_TOP;
use ls8_core::config::Config;
use ls8_core::isa::Opcode;
use ls8_core::isa::opcodes::{ADD, CALL, HALT, LDI, MUL, POP, PRN, PUSH, RET};
use ls8_core::{Fault, Machine, State};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{Program, TestContext};

/// A sink that rejects every write.
#[derive(Debug)]
struct ClosedSink;

impl io::Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_new_machine_initial_state() {
    let machine = Machine::new();
    assert_eq!(machine.state(), &State::Running);
    assert_eq!(machine.pc(), 0);
    assert_eq!(machine.sp(), DEFAULT_STACK_TOP);
    assert!((0..7).all(|i| machine.register(i) == Some(0)));
    assert_eq!(machine.register(7), None);
    assert_eq!(machine.stats().instructions_retired, 0);
}

#[test]
fn test_pc_advances_by_instruction_length() {
    let program = Program::new()
        .ldi(0, 1)
        .add(0, 0)
        .mul(0, 0)
        .prn(0)
        .push(0)
        .pop(1)
        .halt()
        .build();
    let mut ctx = TestContext::new().with_program(&program);

    for expected_pc in [3, 6, 9, 11, 13, 15] {
        assert_eq!(ctx.step(), State::Running);
        assert_eq!(ctx.machine.pc(), expected_pc);
    }
    assert_eq!(ctx.step(), State::Halted);
    assert_eq!(ctx.machine.pc(), 15);
}

#[test]
fn test_ldi_loads_immediate() {
    let mut ctx = TestContext::new().with_program(&[LDI, 6, 0xAB, HALT]);
    ctx.run().unwrap();
    assert_eq!(ctx.machine.register(6), Some(0xAB));
}

#[test]
fn test_alu_results_land_in_first_operand() {
    let program = Program::new()
        .ldi(0, 6)
        .ldi(1, 7)
        .mul(0, 1)
        .add(1, 0)
        .halt()
        .build();
    let mut ctx = TestContext::new().with_program(&program);
    ctx.run().unwrap();

    assert_eq!(ctx.machine.register(0), Some(42));
    assert_eq!(ctx.machine.register(1), Some(49));
}

#[test]
fn test_add_same_register_doubles() {
    let mut ctx = TestContext::new().with_program(&[LDI, 2, 100, ADD, 2, 2, MUL, 2, 2, HALT]);
    ctx.run().unwrap();
    // 200 * 200 = 40000 = 0x9C40
    assert_eq!(ctx.machine.register(2), Some(0x40));
}

#[test]
fn test_halt_stops_and_further_steps_are_no_ops() {
    let mut ctx = TestContext::new().with_program(&Program::new().halt().prn(0).build());

    assert_eq!(ctx.step(), State::Halted);
    assert_eq!(ctx.step(), State::Halted);
    ctx.run().unwrap();

    assert_eq!(ctx.machine.pc(), 0);
    assert_eq!(ctx.machine.stats().instructions_retired, 1);
    assert!(ctx.output().is_empty());
}

#[test]
fn test_illegal_opcode_faults_without_executing_rest() {
    let program = Program::new().ldi(0, 8).raw(&[0xFF]).prn(0).halt().build();
    let mut ctx = TestContext::new().with_program(&program);

    let expected = Fault::IllegalInstruction { pc: 3, opcode: 0xFF };
    assert_eq!(ctx.run(), Err(expected.clone()));
    assert_eq!(ctx.machine.state(), &State::Faulted(expected.clone()));
    assert_eq!(ctx.machine.pc(), 3);
    assert!(ctx.output().is_empty());

    // A faulted machine reports the same fault and never resumes.
    assert_eq!(ctx.machine.step(), Err(expected.clone()));
    assert_eq!(ctx.machine.run_for(10), Err(expected));
    assert_eq!(ctx.machine.stats().instructions_retired, 1);
}

#[rstest]
#[case::zero(0x00)]
#[case::all_ones(0xFF)]
#[case::near_ldi(0b1000_0011)]
#[case::jmp_like(0b0101_0100)]
fn test_unknown_opcodes_are_illegal(#[case] byte: u8) {
    let mut ctx = TestContext::new().with_program(&[byte]);
    assert_eq!(
        ctx.run(),
        Err(Fault::IllegalInstruction {
            pc: 0,
            opcode: byte
        })
    );
}

#[rstest]
#[case::ldi_sp(&[LDI, 7, 1], LDI, 7)]
#[case::ldi_past_file(&[LDI, 8, 1], LDI, 8)]
#[case::add_dst(&[ADD, 7, 0], ADD, 7)]
#[case::mul_src(&[MUL, 0, 200], MUL, 200)]
#[case::prn(&[PRN, 9], PRN, 9)]
#[case::push(&[PUSH, 7], PUSH, 7)]
#[case::pop(&[POP, 7], POP, 7)]
#[case::call(&[CALL, 255], CALL, 255)]
fn test_invalid_register_operand_faults(
    #[case] program: &[u8],
    #[case] opcode: u8,
    #[case] index: u8,
) {
    let mut ctx = TestContext::new().with_program(program);

    assert_eq!(
        ctx.run(),
        Err(Fault::InvalidRegister {
            pc: 0,
            opcode,
            index
        })
    );
    assert_eq!(ctx.machine.sp(), DEFAULT_STACK_TOP);
    assert!((0..7).all(|i| ctx.machine.register(i) == Some(0)));
}

#[test]
fn test_operand_past_end_of_memory_faults() {
    // Jump to 255 where a PRN has no room for its operand.
    let mut ctx = TestContext::new().with_program(&[LDI, 1, 255, CALL, 1]);
    ctx.machine.write(255, PRN).unwrap();

    assert_eq!(
        ctx.run(),
        Err(Fault::OutOfRangeAccess {
            pc: 255,
            opcode: PRN,
            addr: 256
        })
    );
}

#[test]
fn test_pc_advancing_past_memory_faults() {
    let mut ctx = TestContext::new().with_program(&[LDI, 1, 253, CALL, 1]);
    for (addr, byte) in [(253, LDI), (254, 0), (255, 1)] {
        ctx.machine.write(addr, byte).unwrap();
    }

    assert_eq!(
        ctx.run(),
        Err(Fault::OutOfRangeAccess {
            pc: 253,
            opcode: LDI,
            addr: 256
        })
    );
    assert_eq!(ctx.machine.pc(), 253);
    assert_eq!(ctx.machine.register(0), Some(0));
}

/// Places `tail` so it ends on the last byte of memory and jumps to it with
/// R0 = 42 and the return address 8 on the stack.
fn context_with_tail(tail: &[u8]) -> TestContext {
    let start = (256 - tail.len()) as u8;
    let program = Program::new().ldi(1, start).ldi(0, 42).call(1).build();
    let mut ctx = TestContext::new().with_program(&program);
    for (offset, &byte) in tail.iter().enumerate() {
        ctx.machine.write(usize::from(start) + offset, byte).unwrap();
    }
    ctx
}

#[rstest]
#[case::ldi(&[LDI, 0, 7])]
#[case::add(&[ADD, 0, 0])]
#[case::mul(&[MUL, 0, 0])]
#[case::prn(&[PRN, 0])]
#[case::push(&[PUSH, 0])]
#[case::pop(&[POP, 0])]
#[case::call(&[CALL, 1])]
fn test_instruction_without_successor_has_no_effect(#[case] tail: &[u8]) {
    let mut ctx = context_with_tail(tail);
    let start = (256 - tail.len()) as u8;

    assert_eq!(
        ctx.run(),
        Err(Fault::OutOfRangeAccess {
            pc: start,
            opcode: tail[0],
            addr: 256
        })
    );
    assert!(ctx.output().is_empty());
    assert_eq!(ctx.machine.pc(), start);
    assert_eq!(ctx.machine.register(0), Some(42));
    assert_eq!(ctx.machine.sp(), DEFAULT_STACK_TOP - 1);
    assert_eq!(ctx.machine.read(usize::from(DEFAULT_STACK_TOP - 1)), Ok(8));
    assert_eq!(ctx.machine.read(usize::from(DEFAULT_STACK_TOP - 2)), Ok(0));
    assert_eq!(ctx.machine.stats().instructions_retired, 3);
}

#[test]
fn test_ret_in_last_byte_needs_no_successor() {
    let mut ctx = context_with_tail(&[RET]);
    assert_eq!(ctx.step(), State::Running);
    assert_eq!(ctx.step(), State::Running);
    assert_eq!(ctx.step(), State::Running);
    assert_eq!(ctx.machine.pc(), 255);

    assert_eq!(ctx.step(), State::Running);
    assert_eq!(ctx.machine.pc(), 8);
    assert_eq!(ctx.machine.sp(), DEFAULT_STACK_TOP);
}

#[test]
fn test_halt_in_last_byte_is_fine() {
    let mut ctx = TestContext::new().with_program(&[LDI, 1, 255, CALL, 1]);
    ctx.machine.write(255, HALT).unwrap();

    ctx.run().unwrap();
    assert_eq!(ctx.machine.state(), &State::Halted);
    assert_eq!(ctx.machine.pc(), 255);
}

#[test]
fn test_run_for_stops_on_budget() {
    // 0: LDI R1,3  3: PUSH R1  5: RET, looping between 3 and 5 forever.
    let program = Program::new().ldi(1, 3).push(1).ret().build();
    let mut ctx = TestContext::new().with_program(&program);

    assert_eq!(ctx.machine.run_for(11), Ok(State::Running));
    assert_eq!(ctx.machine.stats().instructions_retired, 11);
    assert_eq!(ctx.machine.run_for(1000), Ok(State::Running));
    assert_eq!(ctx.machine.stats().instructions_retired, 1011);
    assert_eq!(ctx.machine.pc(), 3);
    assert_eq!(ctx.machine.sp(), DEFAULT_STACK_TOP);
}

#[test]
fn test_run_for_returns_early_on_halt() {
    let program = Program::new().ldi(0, 8).prn(0).halt().build();
    let mut ctx = TestContext::new().with_program(&program);

    assert_eq!(ctx.machine.run_for(100), Ok(State::Halted));
    assert_eq!(ctx.machine.stats().instructions_retired, 3);
    assert_eq!(ctx.output(), "8\n");
}

#[test]
fn test_run_for_zero_executes_nothing() {
    let mut ctx = TestContext::new().with_program(&Program::new().halt().build());
    assert_eq!(ctx.machine.run_for(0), Ok(State::Running));
    assert_eq!(ctx.machine.stats().instructions_retired, 0);
}

#[test]
fn test_stats_count_retired_instructions() {
    let program = Program::new()
        .ldi(0, 8)
        .ldi(1, 9)
        .mul(0, 1)
        .prn(0)
        .halt()
        .build();
    let mut ctx = TestContext::new().with_program(&program);
    ctx.run().unwrap();

    let stats = ctx.machine.stats();
    assert_eq!(stats.instructions_retired, 5);
    assert_eq!(stats.count(Opcode::Ldi), 2);
    assert_eq!(stats.count(Opcode::Mul), 1);
    assert_eq!(stats.count(Opcode::Add), 0);
    assert_eq!(
        stats.to_string(),
        "5 instructions retired (LDI 2, MUL 1, PRN 1, HALT 1)"
    );
}

#[test]
fn test_faulting_instruction_is_not_counted() {
    let mut ctx = TestContext::new().with_program(&[LDI, 0, 1, POP, 0]);
    let _ = ctx.run();
    assert_eq!(ctx.machine.stats().instructions_retired, 1);
    assert_eq!(ctx.machine.stats().count(Opcode::Pop), 0);
}

#[test]
fn test_output_sink_failure_faults() {
    let program = Program::new().ldi(0, 8).prn(0).halt().build();
    let mut machine = Machine::with_output(&Config::default(), ClosedSink);
    machine.load(&program).unwrap();

    let expected = Fault::Output {
        pc: 3,
        reason: "closed".to_owned(),
    };
    assert_eq!(machine.run(), Err(expected.clone()));
    assert_eq!(machine.state(), &State::Faulted(expected));
}

#[test]
fn test_into_output_returns_captured_bytes() {
    let program = Program::new().ldi(0, 255).prn(0).ldi(0, 0).prn(0).halt().build();
    let mut machine = Machine::with_output(&Config::default(), Vec::new());
    machine.load(&program).unwrap();
    machine.run().unwrap();

    assert_eq!(machine.into_output(), b"255\n0\n".to_vec());
}
