use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use terrahedra::buffer::{BuildParams, MeshBuffer};
use terrahedra::graph::MeshGraph;
use terrahedra::prelude::*;

const RESOLUTION: u32 = 64;

// Creates raw buffers for a grid of quads in the XZ-plane, each split into two
// triangles. Positions are shared by adjacent triangles.
fn grid() -> (Vec<u32>, Vec<[f32; 3]>) {
    let n = RESOLUTION + 1;
    let mut positions = Vec::with_capacity((n * n) as usize);
    for z in 0..n {
        for x in 0..n {
            positions.push([x as f32, ((x * z) % 7) as f32 * 0.1, z as f32]);
        }
    }
    let mut indices = Vec::with_capacity((RESOLUTION * RESOLUTION * 6) as usize);
    for z in 0..RESOLUTION {
        for x in 0..RESOLUTION {
            let a = (z * n) + x;
            let b = a + 1;
            let c = a + n;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    (indices, positions)
}

fn ingest((indices, positions): (Vec<u32>, Vec<[f32; 3]>)) -> MeshGraph {
    MeshGraph::from_raw_buffers(indices, positions).unwrap()
}

fn build(graph: MeshGraph) -> MeshBuffer<u32> {
    graph
        .mesh_builder()
        .with_params(BuildParams::smooth())
        .build()
        .unwrap()
}

#[allow(unused)]
fn benchmark(criterion: &mut Criterion) {
    criterion.bench_function("ingest", move |bencher| {
        bencher.iter_batched(grid, ingest, BatchSize::SmallInput)
    });
    criterion.bench_function("build", move |bencher| {
        bencher.iter_batched(|| ingest(grid()), build, BatchSize::SmallInput)
    });
    criterion.bench_function("face_graph", move |bencher| {
        bencher.iter_batched(
            || ingest(grid()),
            |graph| graph.to_face_graph_by_edges(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
