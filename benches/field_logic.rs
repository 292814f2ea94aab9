use criterion::{black_box, criterion_group, criterion_main, Criterion};
use termblocks::core::board::{clear_full_rows, new_board};
use termblocks::core::Field;
use termblocks::engine::ObjectiveSettings;
use termblocks::replay::{decode, encode, to_base64_gzip, ReplayRecord};
use termblocks::types::{Action, GlobalSettings, BOARD_WIDTH, GARBAGE_CELL};

fn started_field() -> Field {
    let mut field = Field::new(12345, GlobalSettings::default());
    field.start();
    field
}

fn bench_tick(c: &mut Criterion) {
    let mut field = started_field();

    c.bench_function("field_tick", |b| {
        b.iter(|| {
            if field.is_game_over() {
                field = started_field();
            }
            field.tick();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = new_board();
            for y in 36..40 {
                for x in 0..BOARD_WIDTH as i32 {
                    board.set(x, y, GARBAGE_CELL);
                }
            }
            black_box(clear_full_rows(&mut board));
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut field = started_field();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if field.is_game_over() {
                field = started_field();
            }
            field.apply_action(black_box(Action::HardDrop));
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut field = started_field();

    c.bench_function("move_rotate", |b| {
        b.iter(|| {
            field.apply_action(Action::MoveLeft);
            field.apply_action(Action::RotateCw);
            field.apply_action(Action::MoveRight);
            field.apply_action(Action::RotateCcw);
        })
    });
}

fn long_record() -> ReplayRecord {
    let mut record = ReplayRecord::new(
        7,
        GlobalSettings::default(),
        ObjectiveSettings::Endless,
    );
    for i in 0..5_000 {
        record.push(Action::ALL[i % 7], i as i64 * 3);
    }
    record
}

fn bench_replay_codec(c: &mut Criterion) {
    let record = long_record();
    let bytes = encode(&record);

    c.bench_function("replay_encode_5k", |b| {
        b.iter(|| encode(black_box(&record)))
    });
    c.bench_function("replay_decode_5k", |b| {
        b.iter(|| decode(black_box(&bytes)))
    });
    c.bench_function("replay_gzip_5k", |b| {
        b.iter(|| to_base64_gzip(black_box(&record)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move_and_rotate,
    bench_replay_codec
);
criterion_main!(benches);
