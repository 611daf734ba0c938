#![allow(clippy::cast_precision_loss)]
#![allow(clippy::arithmetic_side_effects)]

//! Inserts random keys into both map variants, logs how their tables evolve and
//! plots load factor and capacity against the number of keys inserted.
//!
//! Run with `RUST_LOG=debug` to also see every table rebuild.

use std::error::Error;

use hashmaps::{
    ChainingHashMap, OpenAddressingHashMap, StringHashMap, find_mode, positional_hash,
};
use log::{info, warn};
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric};

/// Number of random keys inserted into each map
const KEY_COUNT: usize = 20_000;
/// Keys inserted between two recorded samples
const SAMPLE_EVERY: usize = 250;
/// Requested capacity of both maps
const INITIAL_CAPACITY: usize = 53;
/// Length of every generated key
const KEY_LENGTH: usize = 6;
/// Load at which the report doubles the chaining table, which never grows on its own
const CHAINING_RESIZE_LOAD: f64 = 1.0;

/// Output file of the load factor chart
const LOAD_CHART: &str = "table_load.png";
/// Output file of the capacity chart
const CAPACITY_CHART: &str = "capacity_growth.png";

/// Font family for every label
const FONT_FAMILY: &str = "sans-serif";
/// Line color of the open addressing map
const OPEN_COLOR: RGBColor = RGBColor(220, 50, 50);
/// Line color of the chaining map
const CHAINED_COLOR: RGBColor = RGBColor(50, 90, 220);
/// Axis description font size
const TEXT_SIZE: u32 = 16;
/// Chart caption font size
const TITLE_SIZE: u32 = 35;

/// State of a map after a given number of insertions
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Keys inserted so far, duplicates included
    inserted: usize,
    /// Load factor of the table
    load: f64,
    /// Number of buckets
    capacity: usize,
    /// Buckets holding no live pair
    empty_buckets: usize,
}

impl Sample {
    /// Captures the current state of `map`
    fn of<M: StringHashMap<usize>>(map: &M, inserted: usize) -> Self {
        Self {
            inserted,
            load: map.table_load(),
            capacity: map.get_capacity(),
            empty_buckets: map.empty_buckets(),
        }
    }
}

/// Generates `count` random alphanumeric keys; duplicates are possible
fn random_keys(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| (&mut rng).sample_iter(&Alphanumeric).take(KEY_LENGTH).map(char::from).collect())
        .collect()
}

/// Inserts every key into `map`, sampling its state along the way.
///
/// `grow` runs after each insertion and may resize the table.
fn fill<M, F>(name: &str, map: &mut M, keys: &[String], mut grow: F) -> Vec<Sample>
where
    M: StringHashMap<usize>,
    F: FnMut(&mut M),
{
    let mut samples = vec![Sample::of(map, 0)];

    for (index, key) in keys.iter().enumerate() {
        map.put(key.as_str(), index);
        grow(&mut *map);

        let inserted = index + 1;
        if inserted % SAMPLE_EVERY == 0 {
            let sample = Sample::of(map, inserted);
            info!(
                "{name}: {} keys, load {:.2}, capacity {}, empty buckets {}",
                sample.inserted, sample.load, sample.capacity, sample.empty_buckets
            );
            samples.push(sample);
        }
    }

    let missing = keys.iter().filter(|key| !map.contains_key(key)).count();
    if missing > 0 {
        warn!("{name}: {missing} inserted keys cannot be found");
    }
    info!("{name}: {} distinct keys stored", map.get_size());

    samples
}

/// One line of a chart
struct Series {
    /// Legend label
    label: &'static str,
    /// Line color
    color: RGBColor,
    /// Points as (keys inserted, value)
    points: Vec<(usize, f64)>,
}

/// Renders `series` into a PNG at `path`
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[Series],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|line| line.points.iter().map(|&(_, y)| y))
        .fold(0.0, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..KEY_COUNT, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    for line in series {
        let line_style = ShapeStyle::from(&line.color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), line_style))?
            .label(line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let keys = random_keys(KEY_COUNT);
    let (_, repeats) = find_mode(&keys);
    info!("generated {KEY_COUNT} keys, most frequent key occurs {repeats} times");

    let mut open = OpenAddressingHashMap::new(INITIAL_CAPACITY, positional_hash);
    let open_samples = fill("open addressing", &mut open, &keys, |_| {});

    let mut chained = ChainingHashMap::new(INITIAL_CAPACITY, positional_hash);
    let chained_samples = fill("chaining", &mut chained, &keys, |map| {
        if map.table_load() > CHAINING_RESIZE_LOAD {
            map.resize_table(map.get_capacity() * 2);
        }
    });

    let load_series = [
        Series {
            label: "Open Addressing",
            color: OPEN_COLOR,
            points: open_samples.iter().map(|s| (s.inserted, s.load)).collect(),
        },
        Series {
            label: "Separate Chaining",
            color: CHAINED_COLOR,
            points: chained_samples.iter().map(|s| (s.inserted, s.load)).collect(),
        },
    ];
    draw_chart(LOAD_CHART, "Table Load While Inserting Random Keys", "Table Load", &load_series)?;

    let capacity_series = [
        Series {
            label: "Open Addressing",
            color: OPEN_COLOR,
            points: open_samples.iter().map(|s| (s.inserted, s.capacity as f64)).collect(),
        },
        Series {
            label: "Separate Chaining",
            color: CHAINED_COLOR,
            points: chained_samples.iter().map(|s| (s.inserted, s.capacity as f64)).collect(),
        },
    ];
    draw_chart(CAPACITY_CHART, "Table Capacity Growth", "Capacity (buckets)", &capacity_series)?;

    info!("Generated plot images: {LOAD_CHART}, {CAPACITY_CHART}");
    Ok(())
}
