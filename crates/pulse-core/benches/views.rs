use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pulse_core::view::{ClassFilter, Filter, SortOrder, filtered_view, status_breakdown, upcoming_alert};
use pulse_core::{BookingRecord, EventClass, MENU, Orders, Status};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

const BOOKERS: [&str; 6] = [
    "Anika Patel",
    "rowan ellis",
    "Maya Chen",
    "Jonas Berg",
    "Priya Raman",
    "Tomasz Wójcik",
];

fn synthetic_records(count: usize, seed: u64) -> Vec<BookingRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default();

    (0..count)
        .map(|i| {
            let mut orders = Orders::empty();
            for category in MENU {
                for item in category.items {
                    if rng.gen_bool(0.3) {
                        orders.set(item.id, rng.gen_range(1..200));
                    }
                }
            }
            BookingRecord {
                contact_number: format!("202-555-{i:04}"),
                title: format!("Synthetic event {i}"),
                booker: BOOKERS[rng.gen_range(0..BOOKERS.len())].to_string(),
                status: Status::ALL[rng.gen_range(0..Status::ALL.len())],
                event_class: EventClass::ALL[rng.gen_range(0..EventClass::ALL.len())],
                date: base + Duration::hours(rng.gen_range(-2_000..8_000)),
                location: "Harbor Labs · Tallinn".to_string(),
                headcount: rng.gen_range(1..500),
                notes: String::new(),
                orders,
            }
        })
        .collect()
}

fn bench_filtered_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view.filtered");
    let filter = Filter {
        event_class: ClassFilter::Only(EventClass::LiveStation),
        search: "anika".to_string(),
        ..Filter::default()
    };

    for size in SIZES {
        let records = synthetic_records(size, 0x00E7_E117);
        group.throughput(Throughput::Elements(size as u64));
        for order in [SortOrder::Soonest, SortOrder::Booker] {
            group.bench_with_input(
                BenchmarkId::new(order.to_string(), size),
                &records,
                |b, records| b.iter(|| black_box(filtered_view(records, &filter, order).len())),
            );
        }
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("view.dashboard");
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).single().unwrap_or_default();

    for size in SIZES {
        let records = synthetic_records(size, 0x00E7_E117);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                let view = filtered_view(records, &Filter::default(), SortOrder::Soonest);
                let alert = upcoming_alert(&view, now, 7);
                black_box((status_breakdown(records), alert))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filtered_view, bench_dashboard);
criterion_main!(benches);
