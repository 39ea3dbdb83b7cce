//! End-to-end scenarios driving the full fetch-decode-execute loop from
//! raw bytecode, the way a loaded program actually runs.

use vmcore::cpu::regs::{Width, R15};
use vmcore::cpu::Cpu;
use vmcore::image::Image;
use vmcore::interrupts::input::{encode_payload, KeyEventKind};
use vmcore::isa::opcode::Opcode;
use vmcore::isa::operand::{Kind, MemSubtype};
use vmcore::memory::manager::{HEAP_BOTTOM, STACK_TOP};
use vmcore::memory::phys::VRAM_BASE;
use vmcore::memory::program::Sector;
use vmcore::memory::MemoryManager;
use vmcore::vfs::FsVfs;

fn reg_byte(index: usize, width: Width) -> u8 {
    let nibble = match width {
        Width::Dword => 0,
        Width::Word => 1,
        Width::Byte => 2,
    };
    (index as u8) | (nibble << 4)
}

fn push_fixed_reg(buf: &mut Vec<u8>, index: usize, width: Width) {
    buf.push(reg_byte(index, width));
}

fn push_tagged_reg(buf: &mut Vec<u8>, index: usize, width: Width) {
    buf.push(Kind::Reg.tag());
    buf.push(reg_byte(index, width));
}

fn push_tagged_imm(buf: &mut Vec<u8>, v: u32) {
    buf.push(Kind::Imm.tag());
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_tagged_dmem_addr(buf: &mut Vec<u8>, addr: u32) {
    buf.push(Kind::DMem.tag());
    buf.push(MemSubtype::Address.tag());
    buf.extend_from_slice(&addr.to_le_bytes());
}

fn new_cpu() -> Cpu<FsVfs> {
    let dir = tempfile::tempdir().unwrap();
    Cpu::new(FsVfs::new(dir.path().to_path_buf()))
}

fn run_to_halt(cpu: &mut Cpu<FsVfs>, max_steps: u32) {
    for _ in 0..max_steps {
        if cpu.halted {
            return;
        }
        cpu.step().unwrap();
    }
    assert!(cpu.halted, "program did not halt within {max_steps} steps");
}

#[test]
fn add_constants_store_to_vram_and_halt() {
    let mut bytes = Vec::new();
    bytes.push(Opcode::Ld as u8);
    push_fixed_reg(&mut bytes, 0, Width::Dword);
    push_tagged_imm(&mut bytes, 7);

    bytes.push(Opcode::Ld as u8);
    push_fixed_reg(&mut bytes, 1, Width::Dword);
    push_tagged_imm(&mut bytes, 3);

    bytes.push(Opcode::Add as u8);
    push_fixed_reg(&mut bytes, 0, Width::Dword);
    push_tagged_reg(&mut bytes, 1, Width::Dword);

    bytes.push(Opcode::St as u8);
    push_tagged_dmem_addr(&mut bytes, VRAM_BASE);
    push_fixed_reg(&mut bytes, 0, Width::Dword);

    bytes.push(Opcode::Hlt as u8);

    let mut cpu = new_cpu();
    let image = Image {
        start_address: 0,
        sectors: vec![Sector { base: 0, bytes }],
    };
    cpu.load_image(image).unwrap();
    run_to_halt(&mut cpu, 10);

    assert_eq!(cpu.regs.get(0), 10);
    assert_eq!(cpu.mm.read_byte(VRAM_BASE).unwrap(), 10);
    assert!(cpu.halted);
}

#[test]
fn call_ret_roundtrip() {
    // CALL forward; HLT; forward: LD R0, #42; RET
    let mut bytes = Vec::new();
    bytes.push(Opcode::Call as u8);
    push_tagged_imm(&mut bytes, 0); // patched below
    let after_call = bytes.len();

    bytes.push(Opcode::Hlt as u8);

    let label = bytes.len() as u32;
    bytes.push(Opcode::Ld as u8);
    push_fixed_reg(&mut bytes, 0, Width::Dword);
    push_tagged_imm(&mut bytes, 42);

    bytes.push(Opcode::Ret as u8);

    bytes[after_call - 4..after_call].copy_from_slice(&label.to_le_bytes());

    let mut cpu = new_cpu();
    cpu.regs.set_sp(STACK_TOP);
    let image = Image {
        start_address: 0,
        sectors: vec![Sector { base: 0, bytes }],
    };
    cpu.load_image(image).unwrap();
    let sp_before = cpu.regs.sp();

    run_to_halt(&mut cpu, 10);

    assert_eq!(cpu.regs.get(0), 42);
    assert!(cpu.halted);
    assert_eq!(cpu.regs.sp(), sp_before);
}

#[test]
fn relocation_rebases_jump_target() {
    // JMP forward; HLT; forward: LD R0, #1; HLT
    let mut bytes = Vec::new();
    let jmp_operand_at;
    bytes.push(Opcode::Jmp as u8);
    bytes.push(Kind::Imm.tag());
    jmp_operand_at = bytes.len();
    bytes.extend_from_slice(&0u32.to_le_bytes()); // patched below

    bytes.push(Opcode::Hlt as u8);

    let label = bytes.len() as u32;
    bytes.push(Opcode::Ld as u8);
    push_fixed_reg(&mut bytes, 0, Width::Dword);
    push_tagged_imm(&mut bytes, 1);
    bytes.push(Opcode::Hlt as u8);

    bytes[jmp_operand_at..jmp_operand_at + 4].copy_from_slice(&label.to_le_bytes());

    let mut cpu = new_cpu();
    let image = Image {
        start_address: 0,
        sectors: vec![Sector { base: 0, bytes }],
    };
    cpu.load_image(image).unwrap();

    run_to_halt(&mut cpu, 10);
    assert_eq!(cpu.regs.get(0), 1);
}

#[test]
fn malloc_free_loop_returns_heap_and_frames_to_baseline() {
    let mut mm = MemoryManager::new();
    let mut hp = HEAP_BOTTOM;
    let sp = STACK_TOP;
    let baseline_frames = mm.free_frame_count();

    for _ in 0..1000 {
        let addr = mm.malloc(&mut hp, sp, 4096).unwrap();
        mm.free(&mut hp, addr, 4096).unwrap();
    }

    assert_eq!(hp, HEAP_BOTTOM);
    assert_eq!(mm.free_frame_count(), baseline_frames);
}

#[test]
fn stack_grows_across_pages_and_pops_in_reverse_order() {
    let mut mm = MemoryManager::new();
    let mut sp = STACK_TOP;
    let hp = HEAP_BOTTOM;
    let baseline_frames = mm.free_frame_count();

    for _ in 0..2048 {
        mm.push(&mut sp, hp, 0x1122_3344).unwrap();
    }
    // A page holds 1024 dwords; 2048 pushes must have mapped at least two.
    assert!(baseline_frames - mm.free_frame_count() >= 2);

    for _ in 0..2048 {
        assert_eq!(mm.pop(&mut sp).unwrap(), 0x1122_3344);
    }
    assert_eq!(sp, STACK_TOP);
}

#[test]
fn keyboard_interrupt_delivers_within_one_instruction_and_resumes() {
    // Handler at vector 1: ST [VRAM_BASE], R15 (byte width); RET
    let mut handler = Vec::new();
    handler.push(Opcode::St as u8);
    push_tagged_dmem_addr(&mut handler, VRAM_BASE);
    push_fixed_reg(&mut handler, R15, Width::Byte);
    handler.push(Opcode::Ret as u8);

    // Main program: five NOPs then HLT, loaded at the heap bottom.
    let mut main = Vec::new();
    for _ in 0..5 {
        main.push(Opcode::Nop as u8);
    }
    main.push(Opcode::Hlt as u8);

    let handler_base = 0x8000_0010u32;
    let mut cpu = new_cpu();
    let image = Image {
        start_address: 0,
        sectors: vec![
            Sector { base: 0, bytes: main },
            Sector { base: handler_base, bytes: handler },
        ],
    };
    cpu.load_image(image).unwrap();
    cpu.mm.write_dword(vmcore::memory::phys::IVT_BASE + 4, handler_base).unwrap();

    let resume_pc = cpu.regs.pc();
    let sp_before = cpu.regs.sp();

    let payload = encode_payload(KeyEventKind::KeyPress, 0x41);
    cpu.interrupts.raise(1, payload);

    // This step both recognizes the pending interrupt and executes the
    // handler's first instruction (the ST).
    cpu.step().unwrap();
    assert_eq!(cpu.mm.read_byte(VRAM_BASE).unwrap(), 0x41);

    // This step executes the handler's RET, landing back where execution
    // was interrupted.
    cpu.step().unwrap();
    assert_eq!(cpu.regs.pc(), resume_pc);
    assert_eq!(cpu.regs.sp(), sp_before);

    // Normal execution resumes from there.
    run_to_halt(&mut cpu, 10);
    assert!(cpu.halted);
}
