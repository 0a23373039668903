//! # Execution Statistics Tests

use ls8_core::isa::Opcode;
use ls8_core::stats::ExecStats;

#[test]
fn test_empty_stats() {
    let stats = ExecStats::default();
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.mix().count(), 0);
    assert_eq!(stats.to_string(), "0 instructions retired");
}

#[test]
fn test_record_counts_per_opcode() {
    let mut stats = ExecStats::default();
    stats.record(Opcode::Ldi);
    stats.record(Opcode::Ldi);
    stats.record(Opcode::Prn);
    stats.record(Opcode::Halt);

    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.count(Opcode::Ldi), 2);
    assert_eq!(stats.count(Opcode::Mul), 0);
    assert_eq!(
        stats.mix().collect::<Vec<_>>(),
        vec![(Opcode::Ldi, 2), (Opcode::Prn, 1), (Opcode::Halt, 1)]
    );
}

#[test]
fn test_display_summary() {
    let mut stats = ExecStats::default();
    stats.record(Opcode::Add);
    stats.record(Opcode::Halt);
    assert_eq!(stats.to_string(), "2 instructions retired (ADD 1, HALT 1)");
}
