pub mod climate_analyzer;

pub use climate_analyzer::{
    ClimateAnalyzer, CountryProfile, DatasetSummary, Extreme, MapPoint, RankOrder,
};
