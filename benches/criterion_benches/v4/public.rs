use criterion::{black_box, Criterion, Bencher};
use paseto_v4::v4::public;
use paseto_v4::{Data, Options};
use serde_json::json;
use crate::utils::{bench_sized_string_group, PUBLIC_KEY, SECRET_KEY};

fn bench_sign(b: &mut Bencher, s: &str) {
  let msg = json!({ "sub": "bench", "data": s });
  let footer = Some(Data::Text(s));
  let options = Options::default();

  b.iter(|| {
    public::sign(black_box(SECRET_KEY), black_box(&msg), black_box(footer), None, &options)
      .expect("Couldn't generate v4 public paseto")
  })
}

fn bench_verify(b: &mut Bencher, s: &str) {
  let msg = json!({ "sub": "bench", "data": s });
  let footer = Some(Data::Text(s));
  let options = Options::default();
  let token = public::sign(SECRET_KEY, &msg, footer, None, &options).expect("Failed to generate token");

  b.iter(|| {
    public::verify(black_box(PUBLIC_KEY), black_box(&token), None, &options)
      .expect("Couldn't verify v4 public paseto")
  })
}

pub fn benches(c: &mut Criterion) {
    bench_sized_string_group(c, "v4::public::sign", 2, &bench_sign);
    bench_sized_string_group(c, "v4::public::verify", 2, &bench_verify);
}
