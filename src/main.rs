use screenplay_parser::{parse_fdx, parse_fountain};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <script.fountain|script.fdx>", args[0]);
        return;
    }

    let file_path = &args[1];

    let content = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("failed to read {}: {}", file_path, e);
            process::exit(1);
        }
    };

    let document = if file_path.to_lowercase().ends_with(".fdx") {
        match parse_fdx(&content, file_path) {
            Ok(document) => document,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    } else {
        parse_fountain(&content)
    };

    println!("Elements: {}", document.elements.len());
    println!("Scenes: {}", document.scene_headings().count());
    println!("Title entries: {}", document.title_page.len());

    match serde_json::to_string_pretty(&document) {
        Ok(json) => {
            let json_path = format!("{}.json", file_path);
            match fs::write(&json_path, json) {
                Ok(()) => println!("JSON saved to: {}", json_path),
                Err(e) => eprintln!("failed to write {}: {}", json_path, e),
            }
        }
        Err(e) => eprintln!("failed to serialize: {}", e),
    }
}
