use rand::Rng;

/// `display_name` followed by a random hex suffix of six to eight digits.
pub(crate) fn generate_key(display_name: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1 << 20..1 << 30);
    format!("{display_name}{suffix:x}")
}
