pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Fails with `"<name> must be between <min> and <max>"` when `value` is outside.
pub fn check_range<T>(name: &str, value: T, min: T, max: T) -> Result<(), String>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(format!("{} must be between {} and {}", name, min, max));
    }
    Ok(())
}
