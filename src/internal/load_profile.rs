#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]

use log::info;
use plotters::prelude::*;
use primetable::{ChainingMap, OpenAddressingMap, hash_function_1, hash_function_2};
use rand::Rng;

// Starting capacity for both tables
const INITIAL_CAPACITY: usize = 53;
// Number of random keys inserted into each table
const NUM_KEYS: usize = 2_000;
// Take a measurement every CHECKPOINT insertions
const CHECKPOINT: usize = 25;

const METHODS: [&str; 2] = ["Quadratic Probing", "Separate Chaining"];

/// One measurement taken after a number of insertions
#[derive(Debug, Clone, Copy)]
struct Sample {
    inserted: usize,
    load: f64,
    empty_buckets: usize,
    size: usize,
    capacity: usize,
}

fn profile_open_addressing(keys: &[String]) -> Vec<Sample> {
    let mut map = OpenAddressingMap::new(INITIAL_CAPACITY, hash_function_1);
    let mut samples = Vec::with_capacity(keys.len() / CHECKPOINT);

    for (i, key) in keys.iter().enumerate() {
        map.put(key.as_str(), i);
        if (i + 1) % CHECKPOINT == 0 {
            samples.push(Sample {
                inserted: i + 1,
                load: map.table_load(),
                empty_buckets: map.empty_buckets(),
                size: map.len(),
                capacity: map.capacity(),
            });
        }
    }

    samples
}

fn profile_chaining(keys: &[String]) -> Vec<Sample> {
    let mut map = ChainingMap::new(INITIAL_CAPACITY, hash_function_1);
    let mut samples = Vec::with_capacity(keys.len() / CHECKPOINT);

    for (i, key) in keys.iter().enumerate() {
        map.put(key.as_str(), i);
        if (i + 1) % CHECKPOINT == 0 {
            samples.push(Sample {
                inserted: i + 1,
                load: map.table_load(),
                empty_buckets: map.empty_buckets(),
                size: map.len(),
                capacity: map.capacity(),
            });
        }
    }

    samples
}

/// Replays the small put/resize walkthrough and prints `empty_buckets, load, size, capacity`
fn walkthrough() {
    println!("\nput example (open addressing)");
    println!("-----------------------------");
    let mut map = OpenAddressingMap::new(53, hash_function_1);
    for i in 0..150 {
        map.put(format!("str{i}"), i * 100);
        if i % 25 == 24 {
            println!(
                "{} {:.2} {} {}",
                map.empty_buckets(),
                map.table_load(),
                map.len(),
                map.capacity()
            );
        }
    }

    println!("\nput example (separate chaining)");
    println!("-------------------------------");
    let mut map = ChainingMap::new(41, hash_function_2);
    for i in 0..50 {
        map.put(format!("str{}", i / 3), i * 100);
        if i % 10 == 9 {
            println!(
                "{} {:.2} {} {}",
                map.empty_buckets(),
                map.table_load(),
                map.len(),
                map.capacity()
            );
        }
    }

    println!("\nresize example (open addressing)");
    println!("--------------------------------");
    let mut map = OpenAddressingMap::new(23, hash_function_1);
    map.put("key1", 10);
    println!("{} {} {:?} {}", map.len(), map.capacity(), map.get("key1"), map.contains_key("key1"));
    map.resize_table(30);
    println!("{} {} {:?} {}", map.len(), map.capacity(), map.get("key1"), map.contains_key("key1"));
}

fn draw_chart<F>(
    path: &str,
    caption: &str,
    y_desc: &str,
    results: &[Vec<Sample>],
    metric: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(&Sample) -> f64,
{
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
    ];
    let line_width = 2;
    let text_size = 16;
    let title_size = 35;

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = results.iter().flatten().map(&metric).fold(0.0, f64::max) * 1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..NUM_KEYS, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, samples) in results.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|sample| (sample.inserted, metric(sample))),
                line_style,
            ))?
            .label(METHODS[method_idx])
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    walkthrough();

    // Generate random keys once so both tables see the same input
    let mut rng = rand::rng();
    let keys: Vec<String> =
        (0..NUM_KEYS).map(|_| format!("key{}", rng.random_range(0..1_000_000u32))).collect();

    let results = vec![profile_open_addressing(&keys), profile_chaining(&keys)];

    for (method, samples) in METHODS.iter().zip(&results) {
        println!("\n{method}");
        for sample in samples.iter().step_by(10) {
            println!(
                "  {:>5} inserted: load = {:.2}, empty buckets = {}, size = {}, capacity = {}",
                sample.inserted, sample.load, sample.empty_buckets, sample.size, sample.capacity
            );
        }
    }

    draw_chart("table_load.png", "Table Load While Inserting", "Load Factor", &results, |s| {
        s.load
    })?;
    draw_chart(
        "empty_buckets.png",
        "Empty Buckets While Inserting",
        "Empty Buckets",
        &results,
        |s| s.empty_buckets as f64,
    )?;

    info!("generated table_load.png and empty_buckets.png");
    println!("Generated plot images: table_load.png, empty_buckets.png");

    Ok(())
}
