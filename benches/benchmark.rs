use criterion::{black_box, criterion_group, criterion_main, Criterion};
use powers_of_tau_ceremony::{
    keypair::PrivateKey,
    srs::{SRSParameters, SRS},
};
use rand::thread_rng;

fn update_algo() {
    let params = SRSParameters::new(2usize.pow(16), 16);

    // Simulate deserialisation
    let srs = SRS::new(params);
    let bytes = srs.serialise();
    let mut srs = SRS::deserialise(bytes, params).unwrap();

    let rng = thread_rng();
    let priv_key = PrivateKey::rand(rng);
    let _proof = srs.update(priv_key);
    let _bytes = srs.serialise();
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("update algo", |b| b.iter(|| black_box(update_algo())));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
