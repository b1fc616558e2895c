//! Performance benchmarks for the quote engine.
//!
//! Covers the pure engine entry points on jobs of growing size and the full
//! HTTP path for a typical quote.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use quote_engine::api::{AppState, QuoteRequest, create_router};
use quote_engine::calculation::{calculate_category_total, calculate_job_total, calculate_quote};
use quote_engine::config::ConfigLoader;
use quote_engine::models::{Category, Job, LineItem, LineItemType, Settings, SurchargeMode};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_job(mode: SurchargeMode) -> Job {
    let mut job = Job::from_settings("Benchmark job", &Settings::default());
    job.id = "job-bench".to_string();
    job.surcharge_percent = Decimal::from(10);
    job.surcharge_mode = mode;
    job
}

/// Creates `top_level` three-deep category chains.
fn create_categories(top_level: usize) -> Vec<Category> {
    (0..top_level)
        .flat_map(|t| {
            (1..=3).map(move |depth| Category {
                id: format!("c{}-{}", t, depth),
                job_id: "job-bench".to_string(),
                parent_id: (depth > 1).then(|| format!("c{}-{}", t, depth - 1)),
                name: format!("Category {}-{}", t, depth),
                surcharge_percent: (depth != 2).then(|| Decimal::from(depth as i64)),
                sort_order: t as i32,
            })
        })
        .collect()
}

/// Spreads `count` line items across every category.
fn create_line_items(categories: &[Category], count: usize) -> Vec<LineItem> {
    (0..count)
        .map(|i| {
            let item_type = match i % 3 {
                0 => LineItemType::Material,
                1 => LineItemType::Labor,
                _ => LineItemType::Equipment,
            };
            LineItem {
                id: format!("item-{}", i),
                category_id: categories[i % categories.len()].id.clone(),
                item_type,
                name: format!("Item {}", i),
                description: None,
                quantity: Decimal::from((i % 20 + 1) as i64),
                unit: "ea".to_string(),
                unit_price: Decimal::new((i * 137 % 50_000) as i64, 2),
                surcharge_percent: (i % 4 == 0).then(|| Decimal::from(2)),
                sort_order: i as i32,
            }
        })
        .collect()
}

/// Creates a request body for the HTTP benchmarks.
fn create_request_body(top_level: usize, item_count: usize) -> String {
    let categories = create_categories(top_level);
    let line_items = create_line_items(&categories, item_count);

    let request_json = serde_json::json!({
        "job": {
            "id": "job-bench",
            "name": "Benchmark job",
            "surcharge_percent": "10",
            "surcharge_mode": "stacking"
        },
        "categories": categories,
        "line_items": line_items
    });
    let request: QuoteRequest =
        serde_json::from_value(request_json).expect("Failed to create request");
    serde_json::to_string(&request).unwrap()
}

/// Benchmark: job totals as the number of line items grows.
fn bench_job_total_scaling(c: &mut Criterion) {
    let job = create_job(SurchargeMode::Stacking);
    let categories = create_categories(10);

    let mut group = c.benchmark_group("job_total");

    for item_count in [10, 100, 1_000, 10_000] {
        let line_items = create_line_items(&categories, item_count);

        group.throughput(Throughput::Elements(item_count as u64));
        group.bench_with_input(
            BenchmarkId::new("line_items", item_count),
            &line_items,
            |b, items| b.iter(|| black_box(calculate_job_total(&job, &categories, items))),
        );
    }

    group.finish();
}

/// Benchmark: stacking against override resolution on the same job.
fn bench_surcharge_modes(c: &mut Criterion) {
    let categories = create_categories(10);
    let line_items = create_line_items(&categories, 1_000);

    let mut group = c.benchmark_group("surcharge_mode");

    for mode in [SurchargeMode::Stacking, SurchargeMode::Override] {
        let job = create_job(mode);
        group.bench_function(mode.as_str(), |b| {
            b.iter(|| black_box(calculate_job_total(&job, &categories, &line_items)))
        });
    }

    group.finish();
}

/// Benchmark: a single category subtree against the full quote.
fn bench_category_and_quote(c: &mut Criterion) {
    let job = create_job(SurchargeMode::Stacking);
    let categories = create_categories(10);
    let line_items = create_line_items(&categories, 1_000);

    c.bench_function("category_total_1000_items", |b| {
        b.iter(|| {
            black_box(calculate_category_total(
                "c0-1",
                &job,
                &categories,
                &line_items,
            ))
        })
    });

    c.bench_function("quote_1000_items", |b| {
        b.iter(|| black_box(calculate_quote(&job, &categories, &line_items)))
    });
}

/// Benchmark: the full HTTP path for a typical quote.
fn bench_http_quote(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_request_body(5, 100);

    c.bench_function("http_quote_100_items", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/quote/totals")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_job_total_scaling,
    bench_surcharge_modes,
    bench_category_and_quote,
    bench_http_quote,
);
criterion_main!(benches);
