use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mzsplash::batch::splash_records;
use mzsplash::io::SpectrumRecord;
use mzsplash::prelude::*;

fn make_spectrum(n: usize) -> Spectrum {
    let ions = (0..n)
        .map(|i| {
            let mz = 50.0 + i as f64 * 1.000_37;
            let intensity = ((i * 7919) % 1000) as f64 + 0.5;
            Ion::new(mz, intensity)
        })
        .collect();
    Spectrum::new(SpectrumType::MS, ions)
}

fn splash_spectra(c: &mut Criterion) {
    let small = make_spectrum(20);
    let large = make_spectrum(2000);
    c.bench_function("splash_small", |b| b.iter(|| splash_it(black_box(&small))));
    c.bench_function("splash_large", |b| b.iter(|| splash_it(black_box(&large))));

    let records: Vec<SpectrumRecord> = (0..500)
        .map(|i| {
            let spectrum = make_spectrum(100 + i);
            let text = format_spectrum(&spectrum);
            SpectrumRecord::new(i.to_string(), text, spectrum)
        })
        .collect();
    c.bench_function("splash_records", |b| {
        b.iter(|| splash_records(black_box(records.clone())))
    });
}

criterion_group!(benches, splash_spectra);
criterion_main!(benches);
