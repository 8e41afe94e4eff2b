//! Emission benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use futures::executor::block_on;
use velo_codegen::{generate, resolve, CodeEmitter, CodegenConfig};
use velo_core::{AxisDistribution, InMemorySource, LayoutMode, Node, Padding};

/// A settings screen: `rows` space-between rows of a label and a toggle.
fn settings_screen(rows: usize) -> (Node, InMemorySource) {
    let mut root = Node::frame("0:0", "Settings")
        .with_layout_mode(LayoutMode::Vertical)
        .with_item_spacing(16.0);
    let mut source = InMemorySource::new();

    for i in 0..rows {
        let toggle_id = format!("{}:2", i + 1);
        source = source.with_instance(toggle_id.clone(), "153:1");
        root = root.with_child(
            Node::frame(format!("{}:0", i + 1), format!("Row {}", i))
                .with_layout_mode(LayoutMode::Horizontal)
                .with_distribution(AxisDistribution::SpaceBetween)
                .with_padding(Padding::symmetric(16.0, 8.0))
                .with_child(Node::text(format!("{}:1", i + 1), "Title", format!("Option {}", i)))
                .with_child(
                    Node::instance(toggle_id, "Toggle")
                        .with_child(Node::text(format!("{}:3", i + 1), "Label", "On")),
                ),
        );
    }
    (root, source)
}

fn emit_small(c: &mut Criterion) {
    let (root, source) = settings_screen(5);
    let config = CodegenConfig::default();
    let resolved = block_on(resolve(&source, &root)).unwrap();

    c.bench_function("emit_small", |b| {
        let mut emitter = CodeEmitter::new(&config);
        b.iter(|| emitter.emit(black_box(&resolved)))
    });
}

fn emit_large(c: &mut Criterion) {
    let (root, source) = settings_screen(200);
    let config = CodegenConfig::default();
    let resolved = block_on(resolve(&source, &root)).unwrap();

    c.bench_function("emit_large", |b| {
        let mut emitter = CodeEmitter::new(&config);
        b.iter(|| emitter.emit(black_box(&resolved)))
    });
}

fn generate_end_to_end(c: &mut Criterion) {
    let (root, source) = settings_screen(50);
    let config = CodegenConfig::default();

    c.bench_function("generate_end_to_end", |b| {
        b.iter(|| block_on(generate(&source, Some(black_box(&root)), &config)))
    });
}

criterion_group!(benches, emit_small, emit_large, generate_end_to_end);
criterion_main!(benches);
