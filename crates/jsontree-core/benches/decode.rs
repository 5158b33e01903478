use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use jsontree_core::{codec, decode, encode, Decode, Decoder, Encode, Encoder, Node, Path, Result};

struct Row {
    id: i64,
    name: String,
    score: f64,
    active: bool,
    tags: Vec<String>,
}

impl Decode for Row {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed()?;
        Ok(Row {
            id: keyed.decode("id")?,
            name: keyed.decode("name")?,
            score: keyed.decode("score")?,
            active: keyed.decode("active")?,
            tags: keyed.decode("tags")?,
        })
    }
}

impl Encode for Row {
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
        let mut keyed = encoder.keyed()?;
        keyed.encode("id", &self.id)?;
        keyed.encode("name", &self.name)?;
        keyed.encode("score", &self.score)?;
        keyed.encode("active", &self.active)?;
        keyed.encode("tags", &self.tags)
    }
}

/// 500 rows with numbers and flags written as text, so every leaf coerces.
fn document() -> String {
    let rows: Vec<String> = (0..500)
        .map(|i| {
            format!(
                r#"{{"id":"{i}","name":"row {i}","score":"{}.5","active":{},"tags":["a","b","c"]}}"#,
                i % 97,
                i % 2
            )
        })
        .collect();
    format!(r#"{{"rows":[{}]}}"#, rows.join(","))
}

fn bench_decode(c: &mut Criterion) {
    let text = document();
    let doc = Node::parse(&text).unwrap();
    let rows = doc.get("rows");

    c.bench_function("parse_500_rows", |b| {
        b.iter(|| codec::parse(black_box(&text)).unwrap())
    });

    c.bench_function("decode_500_rows", |b| {
        b.iter(|| rows.decode::<Vec<Row>>().unwrap())
    });

    c.bench_function("navigate_deep_path", |b| {
        let path = Path::parse("rows[250].tags[2]").unwrap();
        b.iter(|| doc.navigate(black_box(&path)).as_string())
    });
}

fn bench_encode(c: &mut Criterion) {
    let rows: Vec<Row> = decode(Node::parse(&document()).unwrap().get("rows").value()).unwrap();

    c.bench_function("encode_500_rows", |b| b.iter(|| encode(black_box(&rows)).unwrap()));
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
