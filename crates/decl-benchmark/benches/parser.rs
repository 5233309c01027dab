use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

fn benchmark_parser(c: &mut Criterion) {
    let sources = [
        ("Simple", "entityDef foo {\n  \"key\" \"val\"\n}\n".to_owned()),
        (
            "Medium",
            r#"
// Test declarations

decl/exporttest/guisurf1
{
    guiSurf	guis/lvlmaps/genericmap.gui
}

testdecl2 decltable2 { { 0, 0, 0, 0, 1, 1 } }
particle p { { count 40 material textures/particles/dust } }
"#
            .repeat(32),
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, text) in &sources {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", name), text, |b, text| {
            b.iter(|| black_box(decl_parse::parse(text)));
        });
        group.bench_with_input(BenchmarkId::new("parse_reader", name), text, |b, text| {
            b.iter(|| black_box(decl_parse::parse_reader(text.as_bytes())));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
