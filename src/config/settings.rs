use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RankingSettings {
    /// sqrt(coverage) / coverage_divisor is subtracted from every evaluation
    pub coverage_divisor: f64,
    /// Prediction for items none of the group rated
    pub uncovered_score: f64,
    pub score_decimals: i32,
    /// Evaluate a round's candidates on the rayon pool
    pub parallel: bool,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            coverage_divisor: 200.0,
            uncovered_score: -1.0,
            score_decimals: 2,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataSettings {
    pub data_dir: PathBuf,
    pub roster_file: &'static str,
    pub new_dir: &'static str,
    pub current_dir: &'static str,
    pub discarded_dir: &'static str,
    pub reference_file: PathBuf,
    pub album_map_file: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        let data_dir = std::env::var("NEIGHBOURHOOD_DATA_DIR")
            .unwrap_or_else(|_| "userdata".to_string());

        Self {
            data_dir: PathBuf::from(data_dir),
            roster_file: "rym_friends.csv",
            new_dir: "new",
            current_dir: "current",
            discarded_dir: "discarded",
            reference_file: PathBuf::from("my_ratings.csv"),
            album_map_file: PathBuf::from("album_map.json"),
        }
    }
}

impl DataSettings {
    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join(self.roster_file)
    }

    pub fn new_path(&self) -> PathBuf {
        self.data_dir.join(self.new_dir)
    }

    pub fn current_path(&self) -> PathBuf {
        self.data_dir.join(self.current_dir)
    }

    pub fn discarded_path(&self) -> PathBuf {
        self.data_dir.join(self.discarded_dir)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ranking: RankingSettings,
    pub data: DataSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ranking: RankingSettings::default(),
            data: DataSettings::default(),
        }
    }
}
