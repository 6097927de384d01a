/// Required dataset columns
pub const COLUMN_COUNTRY: &str = "País";
pub const COLUMN_MONTH: &str = "Mes";
pub const COLUMN_TEMPERATURE: &str = "Temperatura";
pub const COLUMN_PRECIPITATION: &str = "Precipitaciones";
pub const COLUMN_LATITUDE: &str = "Latitud";
pub const COLUMN_LONGITUDE: &str = "Longitud";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COLUMN_COUNTRY,
    COLUMN_MONTH,
    COLUMN_TEMPERATURE,
    COLUMN_PRECIPITATION,
    COLUMN_LATITUDE,
    COLUMN_LONGITUDE,
];

/// Cell values treated as an absent value
pub const MISSING_MARKERS: [&str; 6] = ["", "nan", "null", "na", "n/a", "none"];

/// Decimal places kept for temperature and precipitation
pub const VALUE_DECIMALS: u32 = 3;

/// Default file names
pub const DEFAULT_DATASET_FILE: &str = "base_actualizada.csv";
pub const DEFAULT_RAIN_MODEL_FILE: &str = "models/rain_model.json";
pub const DEFAULT_RAIN_SCALER_FILE: &str = "models/rain_scaler.json";
pub const DEFAULT_HEAT_MODEL_FILE: &str = "models/heat_model.json";
pub const DEFAULT_HEAT_SCALER_FILE: &str = "models/heat_scaler.json";

/// Configuration sources
pub const CONFIG_FILE_STEM: &str = "climate-explorer";
pub const ENV_PREFIX: &str = "CLIMATE";

/// Presentation defaults
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_DELIMITER: char = ',';
