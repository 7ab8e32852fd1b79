//! Parses large synthetic roadmaps, well-formed and full of unterminated
//! groups, to check that the scan stays linear in the size of the input.

#![allow(missing_docs)]

use std::fmt::Write;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Builds a roadmap with `projects` projects, each holding ten deliverables
/// of five key tasks and one prerequisite list.
fn synthetic_roadmap(projects: usize) -> String {
    let mut text = String::new();
    for p in 0..projects {
        writeln!(text, r"\keyproject[][P{p}]{{2020}}{{Project \emph{{{p}}}}}").unwrap();
        for d in 0..10 {
            writeln!(text, r"\deliverable[][P{p}-D{d}]{{2021}}{{Deliverable {d}}}").unwrap();
            writeln!(text, "Some prose about the deliverable, with {{braces}} and [brackets].").unwrap();
            for t in 0..5 {
                writeln!(text, r"\keytask[][P{p}-D{d}-T{t}]{{2022}}{{Task {t}}}").unwrap();
            }
            writeln!(text, r"\prereq{{\deliverableref{{P{p}-D0, P{p}-D1}} \keyprojectref{{P0}}}}").unwrap();
        }
    }
    text
}

/// A valid preamble followed by `fragments` key tasks whose date group is
/// never closed. None of them match.
fn unterminated_roadmap(fragments: usize) -> String {
    let mut text = String::from("\\keyproject[][P]{2020}{P}\n\\deliverable[][D]{2021}{D}\n");
    text.push_str(&"\\keytask[x]{bad{ ".repeat(fragments));
    text
}

fn scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for projects in [10, 100, 1000] {
        let text = synthetic_roadmap(projects);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(projects), &text, |b, text| {
            b.iter(|| roadmap::parse(text).unwrap());
        });
    }
    group.finish();
}

fn scan_unterminated(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_unterminated");
    for fragments in [1_000, 10_000, 100_000] {
        let text = unterminated_roadmap(fragments);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fragments), &text, |b, text| {
            b.iter(|| roadmap::parse(text).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, scan, scan_unterminated);
criterion_main!(benches);
