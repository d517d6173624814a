mod cli;
mod commands;

use chrono::Utc;
use cli::{CliError, CliOptions};

#[tokio::main]
async fn main() {
    let options = match CliOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(CliError::HelpRequested) => {
            print_usage();
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    match commands::run(&options, Utc::now()).await {
        Ok(outcome) => {
            println!("{}", outcome.output.trim_end());
            if outcome.failed {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: companion-cli [options] <command>\n\
         \n\
         Commands:\n\
         - chat <message>                       Send one message to the assistant\n\
         - personas                             List available personas\n\
         - memory add|list [search]|remove <id>|export\n\
         - tasks add <title>|list|toggle <id>\n\
         - integrations list|connect <name>|disconnect <name>\n\
         \n\
         Options:\n\
         - --server <url>      Assistant API base (default http://127.0.0.1:8080/api)\n\
         - --data-dir <dir>    Local store directory (default .ai-companion)\n\
         - --lang ar|en        Reply language for apologies and greetings (default ar)\n\
         - --persona <id>      Persona to chat with (default ibn-sina)\n\
         - --user <id>         User id sent with chat requests\n\
         - --action <kind>     chat|web_search|analyze_data|process_file\n\
         - --remember          Save the chat turn as a conversation memory\n\
         - --offline           Answer with the local keyword responder, no server\n\
         - --report            Print a session report after the reply\n\
         - --contact <method>  Contact method recorded in the report\n\
         - --type <kind>       Memory type for memory add (default document)\n\
         - --priority <level>  low|medium|high for tasks add (default medium)\n\
         - --out <path>        Export destination (default ai-companion-data-YYYY-MM-DD.json)\n\
         - --help              Show this help text"
    );
}
