use wdc65816::{Address, BusError, Cpu, CpuError, Interrupt, Mem, Register};

/// Flat 16 MiB of RAM. Programs are placed at $00:8000 and the reset vector points there.
struct TestBus {
    mem: Vec<u8>,
}

impl TestBus {
    fn with_program(program: &[u8]) -> Self {
        let mut mem = vec![0; 0x100_0000];
        mem[0x8000..0x8000 + program.len()].copy_from_slice(program);
        mem[0xFFFC] = 0x00;
        mem[0xFFFD] = 0x80;
        Self { mem }
    }

    fn poke(&mut self, addr: u32, bytes: &[u8]) {
        let start = addr as usize;
        self.mem[start..start + bytes.len()].copy_from_slice(bytes);
    }

    fn peek(&self, addr: u32) -> u8 {
        self.mem[addr as usize]
    }
}

impl Mem for TestBus {
    fn load(&mut self, addr: Address) -> Result<u8, BusError> {
        Ok(self.mem[addr.to_u24() as usize])
    }

    fn store(&mut self, addr: Address, value: u8) -> Result<(), BusError> {
        self.mem[addr.to_u24() as usize] = value;
        Ok(())
    }
}

fn boot(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::with_program(program);
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus).unwrap();
    (cpu, bus)
}

fn run(cpu: &mut Cpu, bus: &mut TestBus, steps: usize) -> Vec<u32> {
    (0..steps).map(|_| cpu.tick(bus).unwrap()).collect()
}

// -------------------------------------------------------------------------------------------------

#[test]
fn reset_loads_vector_and_enters_emulation_mode() {
    let mut bus = TestBus::with_program(&[0xEA]);
    let mut cpu = Cpu::new();
    assert_eq!(cpu.tick(&mut bus).unwrap(), 7 + 2);
    assert!(cpu.regs.emulation);
    assert!(cpu.regs.p.small_acc() && cpu.regs.p.small_index() && cpu.regs.p.irq_disable());
    assert_eq!(cpu.regs.pc, 0x8001);
}

#[test]
fn load_and_store_8_bit() {
    // lda #$42 ; sta $10
    let (mut cpu, mut bus) = boot(&[0xA9, 0x42, 0x85, 0x10]);
    assert_eq!(run(&mut cpu, &mut bus, 2), [2, 3]);
    assert_eq!(bus.peek(0x10), 0x42);
    assert_eq!(cpu.regs.pc, 0x8004);
}

#[test]
fn unaligned_direct_page_costs_a_cycle() {
    // lda #$01 ; tcd ; sta $10
    let (mut cpu, mut bus) = boot(&[0xA9, 0x01, 0x5B, 0x85, 0x10]);
    assert_eq!(run(&mut cpu, &mut bus, 3), [2, 2, 4]);
    assert_eq!(bus.peek(0x0011), 0x01);
}

#[test]
fn decimal_add_carries_between_digits() {
    // sed ; clc ; lda #$79 ; adc #$79
    let (mut cpu, mut bus) = boot(&[0xF8, 0x18, 0xA9, 0x79, 0x69, 0x79]);
    run(&mut cpu, &mut bus, 4);
    assert_eq!(cpu.regs.a & 0xFF, 0x58);
    assert!(cpu.regs.p.carry());
}

#[test]
fn sixteen_bit_immediate_is_three_bytes() {
    // clc ; xce ; rep #$30 ; lda #$1234 ; ldx #$ABCD
    let (mut cpu, mut bus) = boot(&[0x18, 0xFB, 0xC2, 0x30, 0xA9, 0x34, 0x12, 0xA2, 0xCD, 0xAB]);
    assert_eq!(run(&mut cpu, &mut bus, 5), [2, 2, 3, 3, 3]);
    assert!(!cpu.regs.emulation);
    assert_eq!(cpu.regs.a, 0x1234);
    assert_eq!(cpu.regs.x, 0xABCD);
    assert_eq!(cpu.regs.pc, 0x800A);
}

#[test]
fn eight_bit_accumulator_keeps_high_byte() {
    // clc ; xce ; rep #$20 ; lda #$1234 ; sep #$20 ; lda #$FF ; inc a
    let program = [0x18, 0xFB, 0xC2, 0x20, 0xA9, 0x34, 0x12, 0xE2, 0x20, 0xA9, 0xFF, 0x1A];
    let (mut cpu, mut bus) = boot(&program);
    run(&mut cpu, &mut bus, 7);
    assert_eq!(cpu.regs.a, 0x1200);
    assert!(cpu.regs.p.zero());
}

#[test]
fn setting_x_flag_clears_index_high_bytes() {
    // clc ; xce ; rep #$10 ; ldx #$1234 ; ldy #$5678 ; sep #$10
    let program = [0x18, 0xFB, 0xC2, 0x10, 0xA2, 0x34, 0x12, 0xA0, 0x78, 0x56, 0xE2, 0x10];
    let (mut cpu, mut bus) = boot(&program);
    run(&mut cpu, &mut bus, 6);
    assert_eq!(cpu.regs.x, 0x34);
    assert_eq!(cpu.regs.y, 0x78);
}

#[test]
fn entering_emulation_forces_small_registers() {
    // clc ; xce ; rep #$30 ; ldx #$1234 ; sec ; xce
    let program = [0x18, 0xFB, 0xC2, 0x30, 0xA2, 0x34, 0x12, 0x38, 0xFB];
    let (mut cpu, mut bus) = boot(&program);
    run(&mut cpu, &mut bus, 6);
    assert!(cpu.regs.emulation);
    assert!(!cpu.regs.p.carry());
    assert!(cpu.regs.p.small_acc() && cpu.regs.p.small_index());
    assert_eq!(cpu.regs.x, 0x34);
    assert_eq!(cpu.regs.s >> 8, 0x01);
}

#[test]
fn compare_and_branch() {
    // lda #$40 ; cmp #$40 ; beq +2 ; nop ; nop ; bne -2
    let program = [0xA9, 0x40, 0xC9, 0x40, 0xF0, 0x02, 0xEA, 0xEA, 0xD0, 0xFE];
    let (mut cpu, mut bus) = boot(&program);
    assert_eq!(run(&mut cpu, &mut bus, 3), [2, 2, 3]);
    assert_eq!(cpu.regs.pc, 0x8008);
    assert!(cpu.regs.p.carry() && cpu.regs.p.zero());
    // not taken
    assert_eq!(cpu.tick(&mut bus).unwrap(), 2);
    assert_eq!(cpu.regs.pc, 0x800A);
}

#[test]
fn compare_sets_carry_zero_and_negative() {
    // lda #$05 ; cmp #$05 ; lda #$03 ; cmp #$05
    let (mut cpu, mut bus) = boot(&[0xA9, 0x05, 0xC9, 0x05, 0xA9, 0x03, 0xC9, 0x05]);
    run(&mut cpu, &mut bus, 2);
    let p = cpu.regs.p;
    assert!(p.zero() && p.carry() && !p.negative());

    run(&mut cpu, &mut bus, 2);
    let p = cpu.regs.p;
    assert!(!p.zero() && !p.carry() && p.negative());
    assert_eq!(cpu.regs.a & 0xFF, 0x03);
}

#[test]
fn test_and_set_bits_use_memory_and_accumulator_for_zero() {
    // lda #$0F ; tsb $10 ; lda #$FF ; trb $10
    let (mut cpu, mut bus) = boot(&[0xA9, 0x0F, 0x04, 0x10, 0xA9, 0xFF, 0x14, 0x10]);
    bus.poke(0x10, &[0xF0]);
    assert_eq!(run(&mut cpu, &mut bus, 2), [2, 5]);
    assert_eq!(bus.peek(0x10), 0xFF);
    assert!(cpu.regs.p.zero());

    run(&mut cpu, &mut bus, 2);
    assert_eq!(bus.peek(0x10), 0x00);
    assert!(!cpu.regs.p.zero());
}

#[test]
fn taken_branch_wraps_inside_the_program_bank() {
    // $01:FFF0: bra +$20 ; $01:0012: nop
    let (mut cpu, mut bus) = boot(&[]);
    bus.poke(0x01_FFF0, &[0x80, 0x20]);
    cpu.regs.k = 0x01;
    cpu.regs.pc = 0xFFF0;
    assert_eq!(cpu.tick(&mut bus).unwrap(), 3);
    assert_eq!((cpu.regs.k, cpu.regs.pc), (0x01, 0x0012));

    // $01:0012: bra -$30
    bus.poke(0x01_0012, &[0x80, 0xD0]);
    cpu.tick(&mut bus).unwrap();
    assert_eq!((cpu.regs.k, cpu.regs.pc), (0x01, 0xFFE4));
}

#[test]
fn subroutine_round_trip() {
    // jsr $8010 ; ... $8010: rts
    let (mut cpu, mut bus) = boot(&[0x20, 0x10, 0x80]);
    bus.poke(0x8010, &[0x60]);
    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x8010);
    assert_eq!(bus.peek(0x0100), 0x80);
    assert_eq!(bus.peek(0x01FF), 0x02);
    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x8003);
    assert_eq!(cpu.regs.s, 0x0100);
}

#[test]
fn long_call_switches_program_bank() {
    // jsl $01:9000 ; ... $01:9000: rtl
    let (mut cpu, mut bus) = boot(&[0x22, 0x00, 0x90, 0x01]);
    bus.poke(0x01_9000, &[0x6B]);
    cpu.tick(&mut bus).unwrap();
    assert_eq!((cpu.regs.k, cpu.regs.pc), (0x01, 0x9000));
    cpu.tick(&mut bus).unwrap();
    assert_eq!((cpu.regs.k, cpu.regs.pc), (0x00, 0x8004));
}

#[test]
fn block_move_copies_a_plus_one_bytes() {
    // clc ; xce ; rep #$30 ; lda #$0002 ; ldx #$1000 ; ldy #$2000 ; mvn $00,$01
    let program = [
        0x18, 0xFB, 0xC2, 0x30, 0xA9, 0x02, 0x00, 0xA2, 0x00, 0x10, 0xA0, 0x00, 0x20, 0x54, 0x01, 0x00,
    ];
    let (mut cpu, mut bus) = boot(&program);
    bus.poke(0x1000, &[0xAA, 0xBB, 0xCC, 0xDD]);
    run(&mut cpu, &mut bus, 6);
    assert_eq!(cpu.tick(&mut bus).unwrap(), 21);
    assert_eq!([bus.peek(0x01_2000), bus.peek(0x01_2001), bus.peek(0x01_2002)], [0xAA, 0xBB, 0xCC]);
    assert_eq!(bus.peek(0x01_2003), 0);
    assert_eq!(cpu.regs.a, 0xFFFF);
    assert_eq!((cpu.regs.x, cpu.regs.y), (0x1003, 0x2003));
    assert_eq!(cpu.regs.dbr, 0x01);
}

#[test]
fn block_move_backwards_decrements_indexes() {
    // clc ; xce ; rep #$30 ; lda #$0002 ; ldx #$1002 ; ldy #$2002 ; mvp $00,$01
    let program = [
        0x18, 0xFB, 0xC2, 0x30, 0xA9, 0x02, 0x00, 0xA2, 0x02, 0x10, 0xA0, 0x02, 0x20, 0x44, 0x01, 0x00,
    ];
    let (mut cpu, mut bus) = boot(&program);
    bus.poke(0x0FFF, &[0x11, 0xAA, 0xBB, 0xCC]);
    run(&mut cpu, &mut bus, 6);
    assert_eq!(cpu.tick(&mut bus).unwrap(), 21);
    assert_eq!([bus.peek(0x01_2000), bus.peek(0x01_2001), bus.peek(0x01_2002)], [0xAA, 0xBB, 0xCC]);
    assert_eq!(bus.peek(0x01_1FFF), 0);
    assert_eq!(cpu.regs.a, 0xFFFF);
    assert_eq!((cpu.regs.x, cpu.regs.y), (0x0FFF, 0x1FFF));
    assert_eq!(cpu.regs.dbr, 0x01);
}

#[test]
fn indexed_absolute_wraps_inside_the_data_bank() {
    // ldx #$02 ; lda $FFFF,x
    let (mut cpu, mut bus) = boot(&[0xA2, 0x02, 0xBD, 0xFF, 0xFF]);
    bus.poke(0x0001, &[0x5A]);
    bus.poke(0x01_0001, &[0xA5]);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs.a, 0x5A);
}

#[test]
fn long_indexed_carries_into_the_bank() {
    // ldx #$02 ; lda $00:FFFF,x
    let (mut cpu, mut bus) = boot(&[0xA2, 0x02, 0xBF, 0xFF, 0xFF, 0x00]);
    bus.poke(0x01_0001, &[0xA5]);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs.a, 0xA5);
}

#[test]
fn emulation_stack_stays_in_page_one() {
    // pha ; pha
    let (mut cpu, mut bus) = boot(&[0x48, 0x48]);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.regs.s, 0x01FE);
}

#[test]
fn brk_pushes_break_flag_in_emulation_mode() {
    // ldx #$FF ; txs ; brk #$00 ; ... $9000: nop
    let (mut cpu, mut bus) = boot(&[0xA2, 0xFF, 0x9A, 0x00, 0x00]);
    bus.poke(0xFFFE, &[0x00, 0x90]);
    bus.poke(0x9000, &[0xEA]);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.tick(&mut bus).unwrap(), 7);
    assert_eq!(cpu.regs.pc, 0x9000);
    assert_eq!(bus.peek(0x01FF), 0x80);
    assert_eq!(bus.peek(0x01FE), 0x05);
    assert_ne!(bus.peek(0x01FD) & 0x10, 0);
    assert!(cpu.regs.p.irq_disable());
    assert_eq!(cpu.tick(&mut bus).unwrap(), 2);
    assert_eq!(cpu.regs.pc, 0x9001);
}

#[test]
fn brk_return_address_survives_a_following_nmi() {
    // ldx #$FF ; txs ; brk #$00 ; ... $9000: nop ; ... $A000: nop
    let (mut cpu, mut bus) = boot(&[0xA2, 0xFF, 0x9A, 0x00, 0x00]);
    bus.poke(0xFFFE, &[0x00, 0x90]);
    bus.poke(0xFFFA, &[0x00, 0xA0]);
    bus.poke(0x9000, &[0xEA]);
    bus.poke(0xA000, &[0xEA]);
    run(&mut cpu, &mut bus, 3);
    cpu.trigger_nmi();
    assert_eq!(cpu.tick(&mut bus).unwrap(), 7 + 2);
    assert_eq!(cpu.regs.pc, 0xA001);
    // BRK frame, then the NMI frame pointing at the BRK handler
    assert_eq!([bus.peek(0x01FF), bus.peek(0x01FE)], [0x80, 0x05]);
    assert_eq!([bus.peek(0x01FC), bus.peek(0x01FB)], [0x90, 0x00]);
    assert_eq!(bus.peek(0x01FA) & 0x10, 0);
}

#[test]
fn native_cop_pushes_program_bank() {
    // clc ; xce ; cop #$12 ; ... $B000: nop
    let (mut cpu, mut bus) = boot(&[0x18, 0xFB, 0x02, 0x12]);
    bus.poke(0xFFE4, &[0x00, 0xB0]);
    run(&mut cpu, &mut bus, 2);
    assert_eq!(cpu.tick(&mut bus).unwrap(), 8);
    assert_eq!((cpu.regs.k, cpu.regs.pc), (0x00, 0xB000));
    assert_eq!([bus.peek(0x0100), bus.peek(0x00FF), bus.peek(0x00FE)], [0x00, 0x80, 0x04]);
    assert!(!cpu.regs.p.decimal());
}

#[test]
fn native_nmi_pushes_program_bank() {
    // clc ; xce ; nop ; ... $A000: nop
    let (mut cpu, mut bus) = boot(&[0x18, 0xFB, 0xEA]);
    bus.poke(0xFFEA, &[0x00, 0xA0]);
    bus.poke(0xA000, &[0xEA]);
    run(&mut cpu, &mut bus, 2);
    cpu.regs.set(Register::S, 0x1FFF).unwrap();
    cpu.regs.k = 0;
    cpu.trigger_nmi();
    assert_eq!(cpu.tick(&mut bus).unwrap(), 8 + 2);
    assert_eq!(cpu.regs.pc, 0xA001);
    assert_eq!(bus.peek(0x1FFF), 0x00);
    assert_eq!(bus.peek(0x1FFE), 0x80);
    assert_eq!(bus.peek(0x1FFD), 0x02);
    assert_eq!(cpu.regs.s, 0x1FFB);
}

#[test]
fn abort_is_serviced_before_irq() {
    // cli ; nop ; ... $A000: nop
    let (mut cpu, mut bus) = boot(&[0x58, 0xEA]);
    bus.poke(0xFFF8, &[0x00, 0xA0]);
    bus.poke(0xFFFE, &[0x00, 0x90]);
    bus.poke(0xA000, &[0xEA]);
    cpu.tick(&mut bus).unwrap();
    cpu.trigger_irq();
    cpu.trigger_abort();
    assert_eq!(cpu.tick(&mut bus).unwrap(), 7 + 2);
    assert_eq!(cpu.regs.pc, 0xA001);
    assert!(cpu.interrupts.is_pending(Interrupt::Irq));
}

#[test]
fn rti_returns_from_irq() {
    // cli ; nop ; ... $9000: rti
    let (mut cpu, mut bus) = boot(&[0x58, 0xEA, 0xEA]);
    bus.poke(0xFFFE, &[0x00, 0x90]);
    bus.poke(0x9000, &[0x40]);
    cpu.tick(&mut bus).unwrap();
    cpu.trigger_irq();
    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x8001);
    assert!(!cpu.regs.p.irq_disable());
    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x8002);
}

#[test]
fn wai_halts_until_an_interrupt() {
    // cli ; wai ; nop ; ... $9000: rti
    let (mut cpu, mut bus) = boot(&[0x58, 0xCB, 0xEA]);
    bus.poke(0xFFFE, &[0x00, 0x90]);
    bus.poke(0x9000, &[0x40]);
    run(&mut cpu, &mut bus, 2);
    assert!(cpu.is_halted());
    assert_eq!(cpu.tick(&mut bus).unwrap(), 0);
    assert_eq!(cpu.regs.pc, 0x8002);

    cpu.trigger_irq();
    cpu.tick(&mut bus).unwrap();
    assert!(!cpu.is_halted());
    assert_eq!(cpu.regs.pc, 0x8002);
}

#[test]
fn stp_only_wakes_on_reset() {
    let (mut cpu, mut bus) = boot(&[0xDB]);
    cpu.tick(&mut bus).unwrap();
    cpu.trigger_nmi();
    assert_eq!(cpu.tick(&mut bus).unwrap(), 0);
    assert!(cpu.interrupts.is_stopped());

    bus.poke(0xFFFC, &[0x00, 0x90]);
    bus.poke(0x9000, &[0xEA]);
    cpu.trigger_reset();
    cpu.tick(&mut bus).unwrap();
    assert!(!cpu.interrupts.is_stopped());
    assert_eq!(cpu.regs.pc, 0x9001);
}

#[test]
fn unassigned_opcode_is_an_error() {
    let (mut cpu, mut bus) = boot(&[0xEA]);
    cpu.opcodes_mut().unassign(0xEA);
    assert_eq!(
        cpu.tick(&mut bus),
        Err(CpuError::UnknownOpcode { opcode: 0xEA, address: Address::new(0, 0x8000) })
    );
}

#[test]
fn saved_state_replays_identically() {
    // loop: inc $10 ; lda $10 ; adc #$03 ; sta $11 ; bra loop
    let program = [0xE6, 0x10, 0xA5, 0x10, 0x69, 0x03, 0x85, 0x11, 0x80, 0xF6];
    let (mut cpu, mut bus) = boot(&program);
    run(&mut cpu, &mut bus, 13);

    let state = cpu.save_state();
    let ram = bus.mem.clone();
    let first = run(&mut cpu, &mut bus, 50);
    let end = (cpu.save_state(), bus.peek(0x10), bus.peek(0x11));

    let mut restored = Cpu::new();
    restored.load_state(&state);
    bus.mem = ram;
    let second = run(&mut restored, &mut bus, 50);
    assert_eq!(first, second);
    assert_eq!((restored.save_state(), bus.peek(0x10), bus.peek(0x11)), end);
    assert_eq!(restored.cycles(), cpu.cycles());
}

#[rustfmt::skip]
const EMULATION_CYCLES: &[(&str, &[u8], u32)] = &[
    ("nop",             &[0xEA],                   2),
    ("lda $10",         &[0xA5, 0x10],             3),
    ("adc $1234,x",     &[0x7D, 0x34, 0x12],       4),
    ("sta [$10]",       &[0x87, 0x10],             6),
    ("stz $1234",       &[0x9C, 0x34, 0x12],       4),
    ("tsb $1234",       &[0x0C, 0x34, 0x12],       6),
    ("bra +0",          &[0x80, 0x00],             3),
    ("brl +0",          &[0x82, 0x00, 0x00],       4),
    ("jmp $9000",       &[0x4C, 0x00, 0x90],       3),
    ("jml $00:9000",    &[0x5C, 0x00, 0x90, 0x00], 4),
    ("jsr $9000",       &[0x20, 0x00, 0x90],       6),
    ("jsr ($9000,x)",   &[0xFC, 0x00, 0x90],       8),
    ("jsl $00:9000",    &[0x22, 0x00, 0x90, 0x00], 8),
    ("rts",             &[0x60],                   6),
    ("rtl",             &[0x6B],                   6),
    ("rti",             &[0x40],                   6),
    ("brk #$00",        &[0x00, 0x00],             7),
    ("cop #$00",        &[0x02, 0x00],             7),
    ("pei ($10)",       &[0xD4, 0x10],             6),
];

/// Run after `clc ; xce ; rep #$10`: native mode, 8-bit A, 16-bit X and Y.
#[rustfmt::skip]
const NATIVE_WIDE_INDEX_CYCLES: &[(&str, &[u8], u32)] = &[
    ("lda $10,x",       &[0xB5, 0x10],             4),
    ("ldx $10,y",       &[0xB6, 0x10],             5),
    ("lda [$10],y",     &[0xB7, 0x10],             6),
    ("lda $00:1234,x",  &[0xBF, 0x34, 0x12, 0x00], 5),
    ("lda $1234,x",     &[0xBD, 0x34, 0x12],       5),
    ("lda $1234,y",     &[0xB9, 0x34, 0x12],       5),
    ("lda ($10),y",     &[0xB1, 0x10],             6),
    ("rti",             &[0x40],                   7),
    ("brk #$00",        &[0x00, 0x00],             8),
    ("cop #$00",        &[0x02, 0x00],             8),
];

#[test]
fn cycles_in_emulation_mode() {
    for &(name, instr, expected) in EMULATION_CYCLES {
        let (mut cpu, mut bus) = boot(instr);
        assert_eq!(cpu.tick(&mut bus).unwrap(), expected, "{name}");
    }
}

#[test]
fn cycles_in_native_mode_with_wide_index() {
    for &(name, instr, expected) in NATIVE_WIDE_INDEX_CYCLES {
        let program = [&[0x18, 0xFB, 0xC2, 0x10][..], instr].concat();
        let (mut cpu, mut bus) = boot(&program);
        run(&mut cpu, &mut bus, 3);
        assert_eq!(cpu.tick(&mut bus).unwrap(), expected, "{name}");
    }
}
