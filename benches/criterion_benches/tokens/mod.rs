use chrono::prelude::*;
use chrono::Duration;
use serde_json::json;
use criterion::{black_box, Criterion, Bencher};
use paseto_v4::tokens::{
  validate_local_token,
  validate_public_token,
  builder::PasetoBuilder,
};
use paseto_v4::Options;

use crate::utils::{bench_sized_string_group, LOCAL_KEY, PUBLIC_KEY, SECRET_KEY};

mod builder;

fn bench_validate_local(b: &mut Bencher, s: &str) {
  let claim = s;
  let footer = s;

  let current_date_time = Utc::now();
  let dt = current_date_time + Duration::days(365);

  let token = PasetoBuilder::new()
    .set_local_key(LOCAL_KEY)
    .set_issued_at(Some(current_date_time))
    .set_expiration(dt)
    .set_issuer(String::from("issuer"))
    .set_audience(String::from("audience"))
    .set_jti(String::from("jti"))
    .set_not_before(current_date_time)
    .set_subject(String::from("test"))
    .set_claim(String::from("claim"), json!(claim))
    .set_footer(String::from(footer))
    .build()
    .expect("Can't build local v4 token");
  let options = Options::default();

  b.iter(|| {
    validate_local_token(
        black_box(&token),
        Some(black_box(footer)),
        LOCAL_KEY,
        None,
        &options,
      )
      .expect("Failed to validate token!")
  });
}

fn bench_validate_public(b: &mut Bencher, s: &str) {
  let claim = s;
  let footer = s;

  let current_date_time = Utc::now();
  let dt = current_date_time + Duration::days(365);

  let token = PasetoBuilder::new()
    .set_secret_key(SECRET_KEY)
    .set_issued_at(Some(current_date_time))
    .set_expiration(dt)
    .set_issuer(String::from("issuer"))
    .set_audience(String::from("audience"))
    .set_jti(String::from("jti"))
    .set_not_before(current_date_time)
    .set_subject(String::from("test"))
    .set_claim(String::from("claim"), json!(black_box(claim)))
    .set_footer(String::from(black_box(footer)))
    .build()
    .expect("Can't build public v4 token");
  let options = Options::default();

  b.iter(|| {
    validate_public_token(
      black_box(&token),
      Some(black_box(footer)),
      black_box(PUBLIC_KEY),
      None,
      &options,
    )
    .expect("Failed to validate token!")
  });
}

pub fn benches(c: &mut Criterion) {
  bench_sized_string_group(c, "token::validate::local", 2, &bench_validate_local);
  bench_sized_string_group(c, "token::validate::public", 2, &bench_validate_public);

  builder::benches(c);
}
