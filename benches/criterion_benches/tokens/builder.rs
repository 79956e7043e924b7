use chrono::prelude::*;
use chrono::Duration;
use serde_json::json;
use criterion::{black_box, Criterion, Bencher};
use paseto_v4::tokens::builder::PasetoBuilder;

use crate::utils::{bench_sized_string_group, LOCAL_KEY, SECRET_KEY};

fn bench_construct_local(b: &mut Bencher, s: &str) {
  let claim = s;
  let footer = s;
  b.iter(|| {
    let now = Utc::now();
    PasetoBuilder::new()
      .set_local_key(LOCAL_KEY)
      .set_issued_at(Some(now))
      .set_expiration(now + Duration::hours(1))
      .set_issuer(String::from("issuer"))
      .set_audience(String::from("audience"))
      .set_jti(String::from("jti"))
      .set_not_before(now)
      .set_subject(String::from("test"))
      .set_claim(String::from("claim"), json!(black_box(claim)))
      .set_footer(String::from(black_box(footer)))
      .build()
      .expect("Can't build local v4 token")
  });
}

fn bench_construct_public(b: &mut Bencher, s: &str) {
  let claim = s;
  let footer = s;

  b.iter(|| {
    let now = Utc::now();
    PasetoBuilder::new()
      .set_secret_key(black_box(SECRET_KEY))
      .set_issued_at(Some(now))
      .set_expiration(now + Duration::hours(1))
      .set_issuer(String::from("issuer"))
      .set_audience(String::from("audience"))
      .set_jti(String::from("jti"))
      .set_not_before(now)
      .set_subject(String::from("test"))
      .set_claim(String::from("claim"), json!(black_box(claim)))
      .set_footer(String::from(black_box(footer)))
      .build()
      .expect("Can't build public v4 token")
  });
}

pub fn benches(c: &mut Criterion) {
  bench_sized_string_group(c, "token::builder::local", 2, &bench_construct_local);
  bench_sized_string_group(c, "token::builder::public", 2, &bench_construct_public);
}
