use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use vtt_thumbnails::{CueParser, PreloadTracker, ThumbnailLocator};

/// One hour of 5-second sprite cues on a 10x10 grid of 160x90 tiles
fn create_test_vtt() -> String {
    let mut vtt = String::from("WEBVTT\n\n");
    for i in 0..720u32 {
        let start = i * 5;
        let end = start + 5;
        let tile = i % 100;
        vtt.push_str(&format!(
            "{:02}:{:02}:{:02}.000 --> {:02}:{:02}:{:02}.000\nsheet{}.jpg#xywh={},{},160,90\n\n",
            start / 3600,
            start / 60 % 60,
            start % 60,
            end / 3600,
            end / 60 % 60,
            end % 60,
            i / 100,
            tile % 10 * 160,
            tile / 10 * 90,
        ));
    }
    vtt
}

fn bench_parse(c: &mut Criterion) {
    let vtt = create_test_vtt();
    let parser = CueParser::for_source("https://cdn.example.com/vtt/thumbs.vtt", "");

    c.bench_function("parse_720_cues", |b| {
        b.iter(|| parser.parse(black_box(&vtt)))
    });
}

fn bench_locate(c: &mut Criterion) {
    let vtt = create_test_vtt();
    let cues = CueParser::default().parse(&vtt).entries;
    let locator = ThumbnailLocator::new(Arc::new(PreloadTracker::default()));

    c.bench_function("locate_end_of_hour", |b| {
        b.iter(|| locator.locate(black_box(0.999), 1280.0, 3600.0, &cues))
    });
}

criterion_group!(benches, bench_parse, bench_locate);
criterion_main!(benches);
