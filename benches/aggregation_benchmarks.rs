//! Performance benchmarks for monthly payroll aggregation.
//!
//! - Single shift pricing
//! - Aggregation of a 31-day month for a growing staff
//! - The monthly payroll endpoint end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::BTreeMap;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use cafe_payroll::api::{AppState, create_router};
use cafe_payroll::calculation::{aggregate, compute_shift_pay};
use cafe_payroll::config::{ConfigLoader, SalaryConstants};
use cafe_payroll::models::{EmployeeShift, PayrollMonth, ShiftType};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn constants() -> SalaryConstants {
    SalaryConstants {
        base_rate: Decimal::from(1000),
        hourly_rate: Decimal::from(100),
        revenue_threshold: Decimal::from(50000),
        percentage_below: Decimal::from(5),
        percentage_above: Decimal::from(8),
    }
}

fn month() -> PayrollMonth {
    PayrollMonth::new(2025, 3).unwrap()
}

/// Revenue alternating around the threshold so both percentages are hit.
fn revenues(month: PayrollMonth) -> Vec<Decimal> {
    (0..month.days())
        .map(|i| Decimal::from(35000 + (i % 5) * 7000))
        .collect()
}

/// A staff where each employee works roughly every other day, some on hours.
fn staff(month: PayrollMonth, employees: usize) -> BTreeMap<String, Vec<EmployeeShift>> {
    (0..employees)
        .map(|e| {
            let shifts = month
                .dates()
                .enumerate()
                .map(|(i, date)| {
                    if (i + e) % 2 == 0 {
                        let shift_type = if i % 3 == 0 { ShiftType::Half } else { ShiftType::Full };
                        let mut shift = EmployeeShift::worked(date, shift_type);
                        if e % 4 == 0 {
                            shift.hours = Some(Decimal::from(7));
                        }
                        shift
                    } else {
                        EmployeeShift::placeholder(date)
                    }
                })
                .collect();
            (format!("emp_{:03}", e), shifts)
        })
        .collect()
}

/// Benchmark: pricing one worked shift.
fn bench_single_shift(c: &mut Criterion) {
    let constants = constants();
    let shift = EmployeeShift::worked(month().first_day(), ShiftType::Full);

    c.bench_function("single_shift", |b| {
        b.iter(|| {
            compute_shift_pay(
                black_box(&shift),
                black_box(Decimal::from(60000)),
                &constants,
                2,
                1,
            )
        })
    });
}

/// Benchmark: aggregating a full month for 1, 10 and 50 employees.
fn bench_aggregate_month(c: &mut Criterion) {
    let month = month();
    let constants = constants();
    let revenues = revenues(month);

    let mut group = c.benchmark_group("aggregate_month");
    for employees in [1usize, 10, 50] {
        let shifts = staff(month, employees);
        group.throughput(Throughput::Elements((employees as u64) * u64::from(month.days())));
        group.bench_with_input(
            BenchmarkId::from_parameter(employees),
            &shifts,
            |b, shifts| {
                b.iter(|| aggregate(month, black_box(&revenues), shifts, &constants, 15, 2))
            },
        );
    }
    group.finish();
}

/// Benchmark: POST /payroll/monthly for 10 employees.
fn bench_monthly_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/cafe").expect("Failed to load config");
    let router = create_router(AppState::in_memory(config));

    let month = month();
    let body = serde_json::json!({
        "year": month.year(),
        "month": month.month(),
        "revenues": revenues(month),
        "employees": staff(month, 10),
    })
    .to_string();

    c.bench_function("monthly_endpoint_10_employees", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/monthly")
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
    bench_single_shift,
    bench_aggregate_month,
    bench_monthly_endpoint,
);

criterion_main!(benches);
