use asesorias_client::models::{AvailabilitySlot, DayOfWeek, Modality};
use asesorias_client::services::matcher;
use chrono::{NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A busy programmer: every day split into half-hour slots across all
/// modalities, every third one disabled.
fn weekly_schedule() -> Vec<AvailabilitySlot> {
    let modalities = [Modality::Presencial, Modality::Virtual, Modality::Hibrida];
    let mut slots = Vec::new();
    let mut id = 0;
    for day in DayOfWeek::ALL {
        for half_hour in 16..44u32 {
            id += 1;
            let start = NaiveTime::from_hms_opt(half_hour / 2, (half_hour % 2) * 30, 0).unwrap();
            let end = start + chrono::Duration::minutes(30);
            slots.push(AvailabilitySlot {
                id,
                programmer_id: 1,
                day_of_week: day,
                start_time: start,
                end_time: end,
                modality: modalities[(id as usize) % 3],
                enabled: id % 3 != 0,
            });
        }
    }
    slots
}

fn benchmark_matcher(c: &mut Criterion) {
    let slots = weekly_schedule();
    let late = NaiveTime::from_hms_opt(21, 45, 0).unwrap();
    let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().and_time(late);

    let mut group = c.benchmark_group("availability_matcher");

    group.bench_function("find_match_miss", |b| {
        b.iter(|| matcher::find_match(black_box(&slots), DayOfWeek::Domingo, late, Modality::Virtual))
    });

    group.bench_function("offerable_slots", |b| {
        b.iter(|| matcher::offerable_slots(black_box(&slots), Modality::Hibrida))
    });

    group.bench_function("is_available_now", |b| {
        b.iter(|| matcher::is_available_now(black_box(&slots), Modality::Presencial, sunday))
    });

    group.finish();
}

criterion_group!(benches, benchmark_matcher);
criterion_main!(benches);
