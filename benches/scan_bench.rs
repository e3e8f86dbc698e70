//! Benchmarks for comment-hunter
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_queue_operations(c: &mut Criterion) {
    use comment_hunter::walker::{Dequeue, JobQueue, ScanJob};

    c.bench_function("queue_send_recv", |b| {
        let queue = JobQueue::new(10000);
        let sender = queue.sender();
        let receiver = queue.receiver();

        b.iter(|| {
            sender
                .send(ScanJob::new("/src/deeply/nested/module.rs".into()))
                .unwrap();
            match receiver.recv() {
                Dequeue::Job(job) => black_box(job),
                _ => unreachable!(),
            };
        })
    });
}

fn benchmark_line_scan(c: &mut Criterion) {
    use comment_hunter::classify::CommentSyntax;
    use comment_hunter::pattern::PatternSet;
    use comment_hunter::scanner::{MatchSink, ScanContext};
    use std::path::Path;

    let context = ScanContext::new(PatternSet::builtin(), MatchSink::disabled());
    let path = Path::new("bench.rs");

    c.bench_function("scan_line_with_match", |b| {
        b.iter(|| {
            black_box(context.scan_line(
                black_box("let x = compute(); // TODO(bench) replace with lookup table"),
                CommentSyntax::DoubleSlash,
                path,
                1,
            ))
        })
    });

    c.bench_function("scan_line_no_comment", |b| {
        b.iter(|| {
            black_box(context.scan_line(
                black_box("let total = values.iter().map(|v| v * 2).sum::<u64>();"),
                CommentSyntax::DoubleSlash,
                path,
                1,
            ))
        })
    });
}

criterion_group!(benches, benchmark_queue_operations, benchmark_line_scan);
criterion_main!(benches);
