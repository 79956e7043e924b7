use criterion::{black_box, Criterion, Bencher};
use paseto_v4::v4::local;
use paseto_v4::{Data, Options};
use serde_json::json;
use crate::utils::{bench_sized_string_group, LOCAL_KEY};

fn bench_encrypt(b: &mut Bencher, s: &str) {
  let msg = json!({ "sub": "bench", "data": s });
  let footer = Some(Data::Text(s));
  let options = Options::default();

  b.iter(|| {
    local::encrypt(black_box(LOCAL_KEY), black_box(&msg), black_box(footer), None, &options)
      .expect("Couldn't generate v4 local paseto")
  })
}

fn bench_decrypt(b: &mut Bencher, s: &str) {
  let msg = json!({ "sub": "bench", "data": s });
  let footer = Some(Data::Text(s));
  let options = Options::default();
  let token = local::encrypt(LOCAL_KEY, &msg, footer, None, &options).expect("Failed to generate token");

  b.iter(|| {
    local::decrypt(black_box(LOCAL_KEY), black_box(&token), None, &options)
      .expect("Couldn't decrypt v4 local paseto")
  })
}

pub fn benches(c: &mut Criterion) {
    bench_sized_string_group(c, "v4::local::encrypt", 2, &bench_encrypt);
    bench_sized_string_group(c, "v4::local::decrypt", 2, &bench_decrypt);
}
