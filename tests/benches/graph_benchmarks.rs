//! # Social Graph Benchmarks
//!
//! | Operation | Expectation |
//! |-----------|-------------|
//! | Batch block check | One store round trip regardless of candidate count |
//! | Recipient resolution | Linear in friends + subscribers + mentions |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sg_relationship_graph::test_utils::{all_services, seed_users};
use sg_relationship_graph::{RelationshipStore, SocialGraphApi, SocialGraphService};
use std::time::Duration;
use tokio::runtime::Runtime;

const SENDER: &str = "sender@example.com";

fn audience_emails(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("user{i}@example.com")).collect()
}

/// Sender with `size` friends, `size` subscribers and every tenth user
/// blocking the sender.
async fn populate(graph: &SocialGraphService<dyn RelationshipStore>, size: usize) -> String {
    let friends = audience_emails(size);
    let subscribers: Vec<String> = (0..size).map(|i| format!("sub{i}@example.com")).collect();

    let mut all: Vec<&str> = vec![SENDER];
    all.extend(friends.iter().map(String::as_str));
    all.extend(subscribers.iter().map(String::as_str));
    seed_users(&**graph.store(), &all).await;

    for (i, friend) in friends.iter().enumerate() {
        graph.create_friendship(SENDER, friend).await.unwrap();
        if i % 10 == 0 {
            graph.create_block(friend, SENDER).await.unwrap();
        }
    }
    for subscriber in &subscribers {
        graph.create_subscription(subscriber, SENDER).await.unwrap();
    }

    // Mention every friend again so mentions go through the batch check
    friends.join(" ")
}

fn bench_resolve_recipients(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("resolve-recipients");
    group.measurement_time(Duration::from_secs(10));

    for size in [10, 100, 500] {
        for (backend, graph) in rt.block_on(all_services()) {
            let text = rt.block_on(populate(&graph, size));

            group.throughput(Throughput::Elements(size as u64 * 2));
            group.bench_with_input(BenchmarkId::new(backend, size), &text, |b, text| {
                b.iter(|| {
                    rt.block_on(async {
                        black_box(graph.resolve_recipients(SENDER, text).await.unwrap())
                    })
                })
            });
        }
    }

    group.finish();
}

fn bench_block_batch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("block-guard-batch");

    for size in [10, 100, 1000] {
        for (backend, graph) in rt.block_on(all_services()) {
            let users = rt.block_on(async {
                let emails = audience_emails(size);
                let mut all: Vec<&str> = vec![SENDER];
                all.extend(emails.iter().map(String::as_str));
                let users = seed_users(&**graph.store(), &all).await;
                for user in users.iter().skip(1).step_by(7) {
                    graph.create_block(&user.email, SENDER).await.unwrap();
                }
                users
            });
            let candidates: Vec<_> = users.iter().skip(1).map(|u| u.id).collect();
            let sender_id = users[0].id;

            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(backend, size), &candidates, |b, ids| {
                b.iter(|| {
                    rt.block_on(async {
                        black_box(
                            graph
                                .block_guard()
                                .are_blocked_batch(sender_id, ids)
                                .await
                                .unwrap(),
                        )
                    })
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_resolve_recipients, bench_block_batch);
criterion_main!(benches);
