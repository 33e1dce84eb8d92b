//! Benchmarks for spatial index construction and ray casting.
//!
//! Run with: cargo bench -p decal-bvh
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p decal-bvh -- --save-baseline main
//! 2. After changes: cargo bench -p decal-bvh -- --baseline main

#![allow(
    missing_docs,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::unwrap_used
)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use decal_bvh::{IndexParams, SpatialIndex};
use decal_types::{Face, MeshSnapshot, Point3, Ray};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create a UV sphere of unit radius with quad faces (triangles at the poles).
fn create_uv_sphere(rings: u32, segments: u32) -> MeshSnapshot {
    let mut vertices = Vec::new();
    vertices.push(Point3::new(0.0, 0.0, 1.0));
    for r in 1..rings {
        let theta = std::f64::consts::PI * f64::from(r) / f64::from(rings);
        for s in 0..segments {
            let phi = std::f64::consts::TAU * f64::from(s) / f64::from(segments);
            vertices.push(Point3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            ));
        }
    }
    let south = vertices.len() as u32;
    vertices.push(Point3::new(0.0, 0.0, -1.0));

    let ring_start = |r: u32| 1 + (r - 1) * segments;
    let mut faces = Vec::new();
    for s in 0..segments {
        let next = (s + 1) % segments;
        faces.push(Face::triangle(0, ring_start(1) + s, ring_start(1) + next));
    }
    for r in 1..rings - 1 {
        for s in 0..segments {
            let next = (s + 1) % segments;
            faces.push(Face::new([
                ring_start(r) + s,
                ring_start(r + 1) + s,
                ring_start(r + 1) + next,
                ring_start(r) + next,
            ]));
        }
    }
    let last = ring_start(rings - 1);
    for s in 0..segments {
        let next = (s + 1) % segments;
        faces.push(Face::triangle(south, last + next, last + s));
    }

    MeshSnapshot::from_parts(vertices, faces)
}

/// Rays from a ring of viewpoints at distance 5, all aimed at the origin.
fn create_rays(count: usize) -> Vec<Ray> {
    (0..count)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / count as f64;
            let origin = Point3::new(5.0 * a.cos(), 5.0 * a.sin(), 0.3 * a.sin());
            Ray::new(origin, -origin.coords)
        })
        .collect()
}

// =============================================================================
// Build Benchmarks
// =============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");
    group.sample_size(20);

    for (rings, segments) in [(16, 32), (64, 128), (256, 512)] {
        let mesh = create_uv_sphere(rings, segments);
        group.throughput(Throughput::Elements(mesh.face_count() as u64));

        group.bench_with_input(
            BenchmarkId::new("sequential", mesh.face_count()),
            &mesh,
            |b, mesh| {
                let params = IndexParams::default().sequential();
                b.iter(|| SpatialIndex::build(black_box(mesh), &params));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", mesh.face_count()),
            &mesh,
            |b, mesh| {
                let params = IndexParams::large_mesh();
                b.iter(|| SpatialIndex::build(black_box(mesh), &params));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Cast Benchmarks
// =============================================================================

fn bench_cast(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cast");
    let rays = create_rays(256);

    for (rings, segments) in [(16, 32), (256, 512)] {
        let mesh = create_uv_sphere(rings, segments);
        let index = SpatialIndex::build(&mesh, &IndexParams::default()).unwrap();
        group.throughput(Throughput::Elements(rays.len() as u64));

        group.bench_function(BenchmarkId::new("hits", mesh.face_count()), |b| {
            b.iter(|| {
                rays.iter()
                    .filter(|ray| index.cast(black_box(ray), 9999.9).is_hit())
                    .count()
            });
        });

        let misses: Vec<Ray> = rays
            .iter()
            .map(|ray| Ray::new(ray.origin, -ray.direction))
            .collect();
        group.bench_function(BenchmarkId::new("misses", mesh.face_count()), |b| {
            b.iter(|| {
                misses
                    .iter()
                    .filter(|ray| index.cast(black_box(ray), 9999.9).is_hit())
                    .count()
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_build, bench_cast);
criterion_main!(benches);
