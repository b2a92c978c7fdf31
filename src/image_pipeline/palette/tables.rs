//! Static false-color lookup tables.
//!
//! Each table holds 256 RGB entries sampled from a continuous color function.
//! Tables are built on first use and never change afterwards.

use std::sync::OnceLock;

/// Named palettes in cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    Grayscale,
    Jet,
    Hot,
    Bone,
    Inferno,
    Viridis,
    Plasma,
    Turbo,
    Rainbow,
    Ocean,
}

impl PaletteKind {
    pub const ALL: [PaletteKind; 10] = [
        Self::Grayscale,
        Self::Jet,
        Self::Hot,
        Self::Bone,
        Self::Inferno,
        Self::Viridis,
        Self::Plasma,
        Self::Turbo,
        Self::Rainbow,
        Self::Ocean,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Jet => "jet",
            Self::Hot => "hot",
            Self::Bone => "bone",
            Self::Inferno => "inferno",
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Turbo => "turbo",
            Self::Rainbow => "rainbow",
            Self::Ocean => "ocean",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }

    /// Linear RGB in `[0, 1]` for `t` in `[0, 1]`.
    fn color(self, t: f64) -> [f64; 3] {
        match self {
            Self::Grayscale => [t, t, t],
            Self::Jet => [
                1.5 - (4.0 * t - 3.0).abs(),
                1.5 - (4.0 * t - 2.0).abs(),
                1.5 - (4.0 * t - 1.0).abs(),
            ],
            Self::Hot => hot(t),
            Self::Bone => {
                let [r, g, b] = hot(t);
                [(7.0 * t + b) / 8.0, (7.0 * t + g) / 8.0, (7.0 * t + r) / 8.0]
            }
            Self::Inferno => polynomial(&INFERNO, t),
            Self::Viridis => polynomial(&VIRIDIS, t),
            Self::Plasma => polynomial(&PLASMA, t),
            Self::Turbo => turbo(t),
            Self::Rainbow => hue_to_rgb((1.0 - t) * 270.0),
            Self::Ocean => [3.0 * t - 2.0, ((3.0 * t - 1.0) / 2.0).abs(), t],
        }
    }
}

fn hot(t: f64) -> [f64; 3] {
    let r = t * 8.0 / 3.0;
    [r, r - 1.0, 4.0 * t - 3.0].map(|c| c.clamp(0.0, 1.0))
}

fn hue_to_rgb(degrees: f64) -> [f64; 3] {
    let h = degrees / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}

// Degree-6 least-squares fits of the matplotlib perceptual maps, coefficients c0..c6 per channel.
const VIRIDIS: [[f64; 3]; 7] = [
    [0.277_727_327_223_417_7, 0.005_407_344_544_966_578, 0.334_099_805_335_306_1],
    [0.105_093_043_108_577_4, 1.404_613_529_898_575, 1.384_590_162_594_685],
    [-0.330_861_828_725_556_3, 0.214_847_559_468_213, 0.095_095_163_028_236_59],
    [-4.634_230_498_983_486, -5.799_100_973_351_585, -19.332_440_956_279_87],
    [6.228_269_936_347_081, 14.179_933_366_805_09, 56.690_552_600_681_05],
    [4.776_384_997_670_288, -13.745_145_377_746_01, -65.353_032_633_372_34],
    [-5.435_455_855_934_631, 4.645_852_612_178_535, 26.312_435_249_583_2],
];

const PLASMA: [[f64; 3]; 7] = [
    [0.058_732_343_923_997_02, 0.023_336_708_925_656_64, 0.543_340_182_674_875_4],
    [2.176_514_634_195_958, 0.238_383_417_126_018_2, 0.753_960_459_978_403_6],
    [-2.689_460_476_458_034, -7.455_851_135_738_909, 3.110_799_939_717_086],
    [6.130_348_345_893_603, 42.346_188_147_722_7, -28.518_854_653_321_58],
    [-11.107_436_190_622_71, -82.666_311_094_280_45, 60.139_847_674_182_63],
    [10.023_065_576_470_65, 71.413_617_700_953_49, -54.072_186_555_600_67],
    [-3.658_713_842_777_788, -22.931_534_654_611_49, 18.191_907_785_398_28],
];

const INFERNO: [[f64; 3]; 7] = [
    [0.000_218_940_369_119_226_5, 0.001_651_004_631_001_012, -0.019_480_898_437_091_84],
    [0.106_513_419_485_611_6, 0.563_956_436_788_409_1, 3.932_712_388_889_277],
    [11.602_493_082_471_87, -3.972_853_965_665_698, -15.942_394_106_291_4],
    [-41.703_996_131_394_59, 17.436_398_882_053_13, 44.354_145_198_728_13],
    [77.162_935_699_427, -33.402_358_942_100_92, -81.807_309_257_389_93],
    [-71.319_428_244_992_14, 32.626_064_263_977_23, 73.209_519_858_032_02],
    [25.131_126_224_773_41, -12.242_668_952_385_67, -23.070_325_002_871_72],
];

fn polynomial(coefficients: &[[f64; 3]; 7], t: f64) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (channel, value) in out.iter_mut().enumerate() {
        *value = coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * t + c[channel]);
    }
    out
}

fn turbo(t: f64) -> [f64; 3] {
    let (t2, t3) = (t * t, t * t * t);
    let (t4, t5) = (t2 * t2, t2 * t3);
    [
        0.135_721_38 + 4.615_392_60 * t - 42.660_322_58 * t2 + 132.131_082_34 * t3
            - 152.942_393_96 * t4
            + 59.286_379_43 * t5,
        0.091_402_61 + 2.194_188_39 * t + 4.842_966_58 * t2 - 14.185_033_33 * t3
            + 4.277_298_57 * t4
            + 2.829_566_04 * t5,
        0.106_673_30 + 12.641_946_08 * t - 60.582_048_36 * t2 + 110.362_767_71 * t3
            - 89.903_109_12 * t4
            + 27.348_249_73 * t5,
    ]
}

/// A 256-entry RGB lookup for one palette.
#[derive(Debug, Clone)]
pub struct PaletteTable {
    kind: PaletteKind,
    entries: [[u8; 3]; 256],
}

impl PaletteTable {
    fn build(kind: PaletteKind) -> Self {
        let mut entries = [[0u8; 3]; 256];
        for (i, entry) in entries.iter_mut().enumerate() {
            let rgb = kind.color(i as f64 / 255.0);
            *entry = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        Self { kind, entries }
    }

    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn lookup(&self, luma: u8) -> [u8; 3] {
        self.entries[usize::from(luma)]
    }

    pub fn entries(&self) -> &[[u8; 3]; 256] {
        &self.entries
    }
}

/// All palette tables, in `PaletteKind::ALL` order.
pub fn palette_tables() -> &'static [PaletteTable] {
    static TABLES: OnceLock<Vec<PaletteTable>> = OnceLock::new();
    TABLES.get_or_init(|| PaletteKind::ALL.iter().map(|&k| PaletteTable::build(k)).collect())
}

pub fn palette_table(kind: PaletteKind) -> &'static PaletteTable {
    &palette_tables()[kind.index()]
}
