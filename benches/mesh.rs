#[macro_use]
extern crate criterion;
extern crate meshkit;

use criterion::{black_box, Criterion};

use meshkit::prelude::*;

const QUADS: usize = 40 * 40;

fn tiny_verts(c: &mut Criterion) {
    let mut mesh = MeshBuilder::new(VertexFormat::POSITION);

    c.bench_function("builder_tiny_verts", |b| {
        b.iter(|| {
            mesh.clear();
            for _ in 0..QUADS {
                mesh.start_vertex().position([0.0, 0.0, 0.0]).unwrap();
                mesh.start_vertex().position([1.0, 0.0, 0.0]).unwrap();
                mesh.start_vertex().position([1.0, 1.0, 0.0]).unwrap();
                mesh.start_vertex().position([0.0, 1.0, 0.0]).unwrap();
                mesh.append_indices(&[0, 1, 2, 2, 0, 3]);
            }
            black_box(mesh.finish().len())
        })
    });
}

fn fat_verts(c: &mut Criterion) {
    let format = VertexFormat::POSITION | VertexFormat::COLOR0 | VertexFormat::TEXCOORD0;
    let mut mesh = MeshBuilder::new(format);

    c.bench_function("builder_fat_verts", |b| {
        b.iter(|| {
            mesh.clear();
            for _ in 0..QUADS {
                mesh.start_vertex()
                    .position([0.0, 0.0, 0.0])
                    .unwrap()
                    .color([128, 0, 255, 255])
                    .unwrap()
                    .texcoord([0.0, 0.0])
                    .unwrap();
                mesh.start_vertex().position([1.0, 0.0, 0.0]).unwrap();
                mesh.start_vertex().position([1.0, 1.0, 0.0]).unwrap();
                mesh.start_vertex().position([0.0, 1.0, 0.0]).unwrap();
                mesh.append_indices(&[0, 1, 2, 2, 0, 3]);
            }
            black_box(mesh.finish().len())
        })
    });
}

criterion_group!(benches, tiny_verts, fat_verts);
criterion_main!(benches);
