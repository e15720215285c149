/// File name written by `redirect --init`.
pub const TEMPLATE_FILE_NAME: &str = "profiles.toml";

/// Generate a starter `profiles.toml`.
pub fn generate_init_template() -> String {
	r#"# Redirect profiles
#
# Profiles are tried in order; the first whose `executables` contains the
# running program's file name is used. Without `executables`, the profile
# name itself is matched.

# Stop here instead of also reading /etc/redirect/profiles.toml
root = true

[[profiles]]
name = "game-x"
executables = ["game-x", "game-x.bin"]

# Rules are matched in order; the first exact match wins.
[[profiles.rules]]
kind = "path-replacement"
source = "/opt/game/save.dat"
target = "/home/user/.local/share/game-x/save.dat"
"#
	.to_string()
}
