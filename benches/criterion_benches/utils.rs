use std::iter;
use std::str;
use criterion::{Criterion, Bencher, Throughput, BenchmarkId};

pub static LOCAL_KEY: &str = "k4.local.TTcJUvQkRlymND41zGOLoykZNhoIKk1jtr82bTl9EHA";
pub static SECRET_KEY: &str =
  "k4.secret.LMThyMVJEesfQX93MJsB77ISs8Ya9YnaEw3Qk-lZvlD7QjtJYfpqqXLflv8Oa82ganJzicoFxwgtcjdc5jMCYA";
pub static PUBLIC_KEY: &str = "k4.public.-0I7SWH6aqly35b_DmvNoGpyc4nKBccILXI3XOYzAmA";

static KB: usize = 1024;
static BENCH_SIZES: [usize; 4] = [1, 1 * KB, 4 * KB, 16 * KB];

/// Run multiple benchmarks with strings of growing size relevant for paseto usage
pub fn bench_sized_string_group(c: &mut Criterion, name: &str, factor: u64, f: &dyn Fn(&mut Bencher, &str)) {
    let mut group = c.benchmark_group(name);
    for size in BENCH_SIZES.iter() {
        group.throughput(Throughput::Bytes((*size as u64) * factor));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
          let bytes = iter::repeat(b'x').take(size).collect::<Vec<_>>();
          let s = str::from_utf8(&bytes).expect("Failed to build bench input");

          f(b, s);
        });
    }
    group.finish();
  }
