//! English catalog (baseline language).

pub(super) const CATALOG: &[(&str, &str)] = &[
    // Main menu
    ("app_title", "BioFlow-CLI  Bioinformatics Workflow Tool"),
    ("menu_prompt", "Select an action:"),
    ("menu_env", "[Environment] Install Bio-tools"),
    ("menu_seq", "[Sequence] Formatting"),
    ("menu_settings", "[Settings] Change Language"),
    ("menu_exit", "[Exit] Quit"),
    // Language selection
    ("lang_prompt", "Please select your language:"),
    ("lang_saved", "Language preference saved."),
    // Environment manager
    ("env_title", "Environment Manager"),
    ("env_select_tool", "Select a tool to install:"),
    ("env_installing", "Installing {tool}..."),
    ("env_install_ok", "{tool} installed successfully."),
    ("env_install_fail", "Failed to install {tool}: {err}"),
    ("env_back", "Back to main menu"),
    ("env_already", "{tool} is already installed."),
    ("env_not_found", "{tool} not found. Ready to install."),
    ("env_checking", "Checking {tool} status..."),
    (
        "env_conda_missing",
        "Conda is not installed. Please install Conda first (https://docs.conda.io/).",
    ),
    (
        "env_conda_hint",
        "Install conda from: https://docs.conda.io/en/latest/miniconda.html",
    ),
    ("env_unknown_tool", "Error: Unknown tool '{tool}'"),
    ("env_available_tools", "Available tools: {tools}"),
    // Sequence tasks
    ("seq_title", "Sequence Formatting"),
    ("seq_input_prompt", "Enter the path to your FASTA file:"),
    ("seq_output_prompt", "Enter the output file path:"),
    ("seq_processing", "Processing sequences..."),
    ("seq_done", "Done! {count} sequences formatted and saved to {path}."),
    ("seq_file_not_found", "File not found: {path}"),
    ("seq_invalid_format", "Invalid FASTA format."),
    ("seq_invalid_width", "Error: width must be positive (got {width})"),
    ("seq_back", "Back to main menu"),
    ("seq_wrap_prompt", "Line wrap width (default 80):"),
    (
        "seq_large_file_warn",
        "Warning: file is {size} MB, may use significant memory.",
    ),
    // General
    ("confirm_exit", "Are you sure you want to exit?"),
    ("yes", "Yes"),
    ("no", "No"),
    ("goodbye", "Goodbye!"),
    ("error_unexpected", "An unexpected error occurred: {err}"),
    ("press_enter", "Press Enter to continue..."),
    ("hint_list", "Up/Down or j/k: move   Enter: select   Esc: back"),
    ("hint_form", "Enter: confirm   Esc: cancel"),
];
