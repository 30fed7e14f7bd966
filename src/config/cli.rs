use crate::domain::model::{AlcoholInput, Sex, SmokingInput};
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Estimate the gain from fewer drinking days
    Alcohol(AlcoholArgs),
    /// Estimate the gain from fewer cigarettes per day
    Smoking(SmokingArgs),
    /// Estimate both factors and show the combined total
    Combined(CombinedArgs),
    /// Print the effective configuration as TOML
    Defaults,
}

#[derive(Debug, Clone, Args)]
pub struct AlcoholArgs {
    #[arg(long, default_value = "28")]
    pub age: u32,

    #[arg(long, default_value = "male")]
    pub sex: Sex,

    /// Current drinking days per week
    #[arg(long, default_value = "4")]
    pub days_now: u32,

    /// Average drinks per drinking day
    #[arg(long, default_value = "2")]
    pub drinks_per_day: u32,

    /// Years of drinking
    #[arg(long = "years", default_value = "5")]
    pub years_drinking: u32,

    /// Goal: drinking days per week
    #[arg(long, default_value = "2")]
    pub days_goal: u32,
}

impl From<&AlcoholArgs> for AlcoholInput {
    fn from(args: &AlcoholArgs) -> Self {
        Self {
            age: args.age,
            sex: args.sex,
            current_days: args.days_now,
            drinks_per_day: args.drinks_per_day,
            years_drinking: args.years_drinking,
            target_days: args.days_goal,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SmokingArgs {
    #[arg(long, default_value = "28")]
    pub age: u32,

    #[arg(long, default_value = "male")]
    pub sex: Sex,

    /// Cigarettes per day now
    #[arg(long, default_value = "10")]
    pub cigs_now: u32,

    /// Goal: cigarettes per day
    #[arg(long, default_value = "0")]
    pub cigs_goal: u32,

    /// Years of smoking
    #[arg(long = "years", default_value = "5")]
    pub years_smoking: u32,
}

impl From<&SmokingArgs> for SmokingInput {
    fn from(args: &SmokingArgs) -> Self {
        Self {
            age: args.age,
            sex: args.sex,
            current_cigarettes: args.cigs_now,
            target_cigarettes: args.cigs_goal,
            years_smoking: args.years_smoking,
        }
    }
}

/// 兩個因子共用年齡與性別
#[derive(Debug, Clone, Args)]
pub struct CombinedArgs {
    #[arg(long, default_value = "28")]
    pub age: u32,

    #[arg(long, default_value = "male")]
    pub sex: Sex,

    #[arg(long, default_value = "4")]
    pub days_now: u32,

    #[arg(long, default_value = "2")]
    pub drinks_per_day: u32,

    #[arg(long, default_value = "5")]
    pub years_drinking: u32,

    #[arg(long, default_value = "2")]
    pub days_goal: u32,

    #[arg(long, default_value = "10")]
    pub cigs_now: u32,

    #[arg(long, default_value = "0")]
    pub cigs_goal: u32,

    #[arg(long, default_value = "5")]
    pub years_smoking: u32,
}

impl CombinedArgs {
    pub fn alcohol_input(&self) -> AlcoholInput {
        AlcoholInput {
            age: self.age,
            sex: self.sex,
            current_days: self.days_now,
            drinks_per_day: self.drinks_per_day,
            years_drinking: self.years_drinking,
            target_days: self.days_goal,
        }
    }

    pub fn smoking_input(&self) -> SmokingInput {
        SmokingInput {
            age: self.age,
            sex: self.sex,
            current_cigarettes: self.cigs_now,
            target_cigarettes: self.cigs_goal,
            years_smoking: self.years_smoking,
        }
    }
}
