//! 辞書の行の分割速度のベンチマーク
//!
//! その場で復号するCSV分割と、csv-coreによる読み込み、
//! 区切り文字による分割の速度を比較します。

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mecab_utils::fingerprint::fingerprint;
use mecab_utils::tokenizer::{tokenize, tokenize_collapsed, tokenize_csv};

const ROWS: &[&str] = &[
    "京都,4,4,5,京都,名詞,固有名詞,地名,一般,*,*,キョウト,京都,*,A,*,*,*,1/5",
    "東京都,5,5,9,東京都,名詞,固有名詞,地名,一般,*,*,トウキョウト,東京都,*,B,5/9,*,5/9,*",
    "\"1,2-ジクロロエタン\",1285,1285,7895,名詞,普通名詞,一般,*,*,*,イチニジクロロエタン",
    "\"\"\"\",5966,5966,2681,補助記号,括弧閉,*,*,*,*,\"\"\"\"",
];

fn corpus() -> Vec<u8> {
    let mut lines = vec![];
    for _ in 0..256 {
        for row in ROWS {
            lines.extend_from_slice(row.as_bytes());
            lines.push(b'\n');
        }
    }
    lines
}

fn bench_tokenizers(c: &mut Criterion) {
    let corpus = corpus();
    let lines: Vec<&[u8]> = corpus.split(|&b| b == b'\n').filter(|l| !l.is_empty()).collect();

    let mut group = c.benchmark_group("Tokenization Speed");
    group.throughput(Throughput::Bytes(corpus.len() as u64));
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function(BenchmarkId::new("CSV in place", "Lexicon"), |b| {
        b.iter_with_setup(
            || lines.iter().map(|l| l.to_vec()).collect::<Vec<_>>(),
            |mut bufs| {
                let mut fields = Vec::with_capacity(32);
                for buf in &mut bufs {
                    fields.clear();
                    tokenize_csv(buf, 32, &mut fields);
                    black_box(fingerprint(fields[0]));
                }
            },
        );
    });

    group.bench_function(BenchmarkId::new("csv-core", "Lexicon"), |b| {
        b.iter(|| {
            let mut output = [0; 4096];
            for line in &lines {
                let mut rdr = csv_core::Reader::new();
                let mut input: &[u8] = line;
                loop {
                    let (result, nin, nout) = rdr.read_field(input, &mut output);
                    black_box(&output[..nout]);
                    input = &input[nin..];
                    match result {
                        csv_core::ReadFieldResult::Field { .. } => {}
                        _ => break,
                    }
                }
            }
        });
    });

    group.bench_function(BenchmarkId::new("Delimiter split", "Lexicon"), |b| {
        b.iter(|| {
            let mut fields = Vec::with_capacity(32);
            for line in &lines {
                fields.clear();
                black_box(tokenize(line, b",", 32, &mut fields));
            }
        });
    });

    group.bench_function(BenchmarkId::new("Collapsed split", "Lexicon"), |b| {
        b.iter(|| {
            let mut fields = Vec::with_capacity(32);
            for line in &lines {
                fields.clear();
                black_box(tokenize_collapsed(line, b",*", 32, &mut fields));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_tokenizers);
criterion_main!(benches);
