use std::env;
use std::io::{self, Write};

use faqbot::{ChatBot, SearchType};

pub enum Command {
    Ask { text: String },
    Add { question: String, answer: String },
    Update { id: u32, question: String, answer: String },
    Delete { id: u32 },
    List,
    Count,
}

/// Parse a command from a provided argument vector
/// This is used both for command-line args and REPL input
pub fn parse_command_from_args(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command provided. Use: ask, add, update, delete, list, count".to_string());
    }

    let command = &args[1];

    match command.as_str() {
        "ask" => parse_ask(args),
        "add" => parse_add(args),
        "update" => parse_update(args),
        "delete" => parse_delete(args),
        "list" => parse_list(args),
        "count" => parse_count(args),
        _ => Err(format!(
            "Unknown command: {}. Available: ask, add, update, delete, list, count",
            command
        )),
    }
}

/// Parse the 'ask' command
/// Usage: faqbot ask <question text>
fn parse_ask(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'ask' command requires a question. Usage: faqbot ask <question text>".to_string());
    }
    Ok(Command::Ask { text: args[2..].join(" ") })
}

/// Parse the 'add' command
/// Usage: faqbot add <question> | <answer>
fn parse_add(args: &[String]) -> Result<Command, String> {
    let rest = args[2..].join(" ");
    let Some((question, answer)) = rest.split_once('|') else {
        return Err("'add' command requires a question and an answer separated by '|'. Usage: faqbot add <question> | <answer>".to_string());
    };

    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err("Both question and answer are required".to_string());
    }

    Ok(Command::Add { question: question.to_string(), answer: answer.to_string() })
}

/// Parse the 'update' command
/// Usage: faqbot update <id> <question> | <answer>
fn parse_update(args: &[String]) -> Result<Command, String> {
    if args.len() < 4 {
        return Err("'update' command requires an id, a question and an answer. Usage: faqbot update <id> <question> | <answer>".to_string());
    }

    let id = args[2]
        .parse::<u32>()
        .map_err(|_| format!("Invalid id: '{}'. Must be a positive integer.", args[2]))?;

    let rest = args[3..].join(" ");
    let Some((question, answer)) = rest.split_once('|') else {
        return Err("'update' requires the question and answer separated by '|'".to_string());
    };

    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err("Both question and answer are required".to_string());
    }

    Ok(Command::Update { id, question: question.to_string(), answer: answer.to_string() })
}

/// Parse the 'delete' command
/// Usage: faqbot delete <id>
fn parse_delete(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'delete' command requires an id. Usage: faqbot delete <id>".to_string());
    }
    let id = args[2]
        .parse::<u32>()
        .map_err(|_| format!("Invalid id: '{}'. Must be a positive integer.", args[2]))?;
    Ok(Command::Delete { id })
}

/// Parse the 'list' command
/// Usage: faqbot list
fn parse_list(args: &[String]) -> Result<Command, String> {
    if args.len() > 2 {
        eprintln!("Warning: 'list' command takes no arguments, ignoring extras");
    }
    Ok(Command::List)
}

/// Parse the 'count' command
/// Usage: faqbot count
fn parse_count(args: &[String]) -> Result<Command, String> {
    if args.len() > 2 {
        eprintln!("Warning: 'count' command takes no arguments, ignoring extras");
    }
    Ok(Command::Count)
}

/// REPL mode - chat with the bot, with admin commands mixed in.
/// Plain input is treated as a chat message; lines starting with a known
/// command word are parsed as commands.
pub fn run_repl(bot: &mut ChatBot) {
    println!("faqbot - FAQ chatbot");
    println!("Ask me anything, or type 'help' for admin commands, 'exit' or 'quit' to quit\n");

    loop {
        print!("you> ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => {}
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_help();
            continue;
        }

        let first_word = input.split_whitespace().next().unwrap_or("");
        if matches!(first_word, "ask" | "add" | "update" | "delete" | "list" | "count") {
            let mut args: Vec<String> = vec!["faqbot".to_string()];
            args.extend(input.split_whitespace().map(|s| s.to_string()));

            match parse_command_from_args(&args) {
                Ok(command) => execute_command(bot, command),
                Err(error) => eprintln!("Error: {}", error),
            }
            continue;
        }

        // Everything else is a chat message
        let reply = bot.reply(input);
        println!("bot> {} (confidence {})", reply.response, reply.confidence);
    }
}

/// Single-command mode - load the knowledge base from a path and execute
/// one command against it
/// Usage: faqbot <data.json> <command> [args...]
pub fn run_single_command() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: faqbot <data.json> <command> [args...]");
        std::process::exit(1);
    }

    let data_path = &args[1];
    let mut bot = ChatBot::load(data_path);

    // Rebuild args: shift so args[1] becomes the command
    let shifted_args: Vec<String> = std::iter::once(args[0].clone())
        .chain(args[2..].iter().cloned())
        .collect();

    match parse_command_from_args(&shifted_args) {
        Ok(command) => execute_command(&mut bot, command),
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    }
}

fn execute_command(bot: &mut ChatBot, command: Command) {
    match command {
        Command::Ask { text } => {
            let result = bot.search(&text);
            match (&result.answer, result.search_type) {
                (Some(answer), SearchType::QuestionMatch) => {
                    println!("{} (confidence {:.2}, question match)", answer, result.confidence);
                }
                (Some(answer), _) => {
                    println!("{} (confidence {:.2}, reverse lookup)", answer, result.confidence);
                }
                (None, _) => {
                    println!("No match (best score {:.2})", result.confidence);
                }
            }
        }
        Command::Add { question, answer } => {
            if bot.add(&question, &answer) {
                println!("Added");
            } else {
                eprintln!("Failed to add pair");
            }
        }
        Command::Update { id, question, answer } => {
            if bot.update(id, &question, &answer) {
                println!("Updated id {}", id);
            } else {
                eprintln!("No pair with id {}", id);
            }
        }
        Command::Delete { id } => {
            if bot.delete(id) {
                println!("Deleted id {}", id);
            } else {
                eprintln!("No pair with id {}", id);
            }
        }
        Command::List => {
            for pair in bot.pairs() {
                println!("[{}] Q: {}", pair.id, pair.question);
                println!("    A: {}", pair.answer);
            }
        }
        Command::Count => {
            println!("{}", bot.pairs().len());
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <anything else>                chat with the bot");
    println!("  ask <question text>            raw retrieval (answer + confidence)");
    println!("  add <question> | <answer>      add a Q&A pair");
    println!("  update <id> <question> | <answer>  update a Q&A pair");
    println!("  delete <id>                    delete a Q&A pair");
    println!("  list                           list all pairs");
    println!("  count                          number of pairs");
    println!("  exit | quit                    leave");
}
