use palette::Srgb;

/// Recursion depth at which a box is collapsed; `2^MAX_DEPTH` bounds the
/// number of clusters.
pub const MAX_DEPTH: u32 = 4;

pub const MAX_CLUSTERS: usize = 1 << MAX_DEPTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn of(self, color: &Srgb<u8>) -> u8 {
        match self {
            Channel::Red => color.red,
            Channel::Green => color.green,
            Channel::Blue => color.blue,
        }
    }
}

/// Median-cut `colors` into at most [`MAX_CLUSTERS`] clusters.
///
/// The result order is fully determined by the input order: left halves come
/// before right halves and ties between equal channel values keep their
/// original relative order. Empty input gives empty output.
pub fn median_cut(colors: &[Srgb<u8>]) -> Vec<Srgb<u8>> {
    if colors.is_empty() {
        return Vec::new();
    }
    let mut clusters = Vec::with_capacity(MAX_CLUSTERS);
    split_box(colors.to_vec(), 0, &mut clusters);
    clusters
}

fn split_box(mut colors: Vec<Srgb<u8>>, depth: u32, out: &mut Vec<Srgb<u8>>) {
    if depth >= MAX_DEPTH || colors.len() <= 1 {
        out.push(mean_color(&colors));
        return;
    }

    let axis = widest_channel(&colors);
    colors.sort_by_key(|color| axis.of(color));

    let right = colors.split_off(colors.len() / 2);
    split_box(colors, depth + 1, out);
    split_box(right, depth + 1, out);
}

fn widest_channel(colors: &[Srgb<u8>]) -> Channel {
    let range = |channel: Channel| {
        let (min, max) = colors.iter().fold((u8::MAX, u8::MIN), |(min, max), color| {
            let v = channel.of(color);
            (min.min(v), max.max(v))
        });
        max - min
    };

    let (r, g, b) = (range(Channel::Red), range(Channel::Green), range(Channel::Blue));
    if r >= g && r >= b {
        Channel::Red
    } else if g >= b {
        Channel::Green
    } else {
        Channel::Blue
    }
}

fn mean_color(colors: &[Srgb<u8>]) -> Srgb<u8> {
    let n = colors.len().max(1) as f64;
    let (r, g, b) = colors.iter().fold((0u64, 0u64, 0u64), |(r, g, b), c| {
        (
            r + u64::from(c.red),
            g + u64::from(c.green),
            b + u64::from(c.blue),
        )
    });
    let channel = |sum: u64| (sum as f64 / n).round() as u8;
    Srgb::new(channel(r), channel(g), channel(b))
}
