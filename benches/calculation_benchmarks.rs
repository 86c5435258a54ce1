//! Performance benchmarks for the Payroll Engine.
//!
//! Covers a single payslip, payroll runs over growing role populations, and
//! a preview request through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;
use std::sync::Arc;

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{PayComponentRules, calculate_payslip};
use payroll_engine::config::ConfigLoader;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::models::{Employee, PayrollInput, RoleGroup};
use payroll_engine::store::{MemoryEmployeeDirectory, MemoryHolidayStore, MemoryPayrollStore};

fn config() -> ConfigLoader {
    ConfigLoader::load("./config/ph_statutory").expect("Failed to load config")
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
}

/// Builds a directory of `count` Staff employees.
fn staff(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| Employee {
            id: format!("EMP-{:05}", i + 1),
            name: format!("Bench Employee {}", i + 1),
            role: RoleGroup::Staff,
        })
        .collect()
}

fn engine_for(employees: Vec<Employee>) -> PayrollEngine {
    PayrollEngine::new(
        config(),
        Arc::new(MemoryEmployeeDirectory::new(employees)),
        Arc::new(MemoryPayrollStore::new()),
        Arc::new(MemoryHolidayStore::new()),
    )
}

/// A busy month: overtime, night differential and both loans.
fn busy_input() -> PayrollInput {
    PayrollInput {
        overtime_hours: Some(Decimal::from(12)),
        night_differential_amount: Some(Decimal::from_str("1850.50").unwrap()),
        sss_loan: Some(Decimal::from(1200)),
        provident_fund_loan: Some(Decimal::from(800)),
        ..PayrollInput::new(RoleGroup::Staff, Decimal::from(45000))
    }
}

/// Benchmark: One payslip with its audit trace.
fn bench_single_payslip(c: &mut Criterion) {
    let loader = config();
    let schedule = loader.schedule_on(run_date()).unwrap().clone();
    let rules = PayComponentRules::default();
    let employee = staff(1).remove(0);
    let input = busy_input();

    c.bench_function("single_payslip", |b| {
        b.iter(|| {
            black_box(calculate_payslip(
                black_box(&employee),
                black_box(&input),
                &schedule,
                &[],
                &rules,
            ))
        })
    });
}

/// Benchmark: Preview runs over growing populations.
fn bench_preview_scaling(c: &mut Criterion) {
    let input = busy_input();
    let mut group = c.benchmark_group("preview_scaling");

    for count in [10usize, 100, 1000] {
        let engine = engine_for(staff(count));
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &count, |b, _| {
            b.iter(|| black_box(engine.preview_payroll(&input, run_date())))
        });
    }

    group.finish();
}

/// Benchmark: A saved run of 1000 employees, each iteration on an empty store.
fn bench_generate_1000(c: &mut Criterion) {
    let input = busy_input();
    let employees = staff(1000);

    let mut group = c.benchmark_group("generate");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("generate_1000", |b| {
        b.iter_batched(
            || engine_for(employees.clone()),
            |engine| black_box(engine.generate_payroll_as_of(&input, run_date())),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

/// Benchmark: POST /payroll/preview for 100 employees.
fn bench_http_preview(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(engine_for(staff(100))));
    let body = serde_json::json!({
        "role": "Staff",
        "base_salary": "45000",
        "overtime_hours": "12",
        "as_of": "2026-03-31"
    })
    .to_string();

    c.bench_function("http_preview_100", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/preview")
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
    bench_single_payslip,
    bench_preview_scaling,
    bench_generate_1000,
    bench_http_preview,
);
criterion_main!(benches);
