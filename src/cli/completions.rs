use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    smlm-sync completions bash > ~/.bash_completion.d/smlm-sync\n\n\
                  Generate zsh completions:\n    smlm-sync completions zsh > ~/.zfunc/_smlm-sync\n\n\
                  Generate fish completions:\n    smlm-sync completions fish > ~/.config/fish/completions/smlm-sync.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
