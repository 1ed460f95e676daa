// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! console-session CLI
//!
//! Drives the login handshake and authenticated calls from the shell.

use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use console_session::{Method, Request, Session, SessionConfig};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("console_session=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: console-session parse <url>");
                return ExitCode::from(1);
            }
            parse_url(&args[2])
        }
        "login" => {
            if args.len() < 3 {
                eprintln!("Usage: console-session login <config.json>");
                return ExitCode::from(1);
            }
            login(&args[2])
        }
        "get" => {
            if args.len() < 4 {
                eprintln!("Usage: console-session get <config.json> <path> [query]");
                return ExitCode::from(1);
            }
            get(&args[2], &args[3], args.get(4).map(String::as_str))
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("console-session {}", console_session::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"console-session - Authenticated HTTP driver for web consoles under test

USAGE:
    console-session <COMMAND> [OPTIONS]

COMMANDS:
    parse <url>                          Split a URL into base URL and parameters
    login <config.json>                  Run the login handshake and print the cookies
    get <config.json> <path> [query]     Log in, then GET home_url + path
    help                                 Show this help message
    version                              Show version information

EXAMPLES:
    console-session parse "https://console.test/api?page=1&size=20"
    console-session login session.json
    console-session get session.json /api/models "page=1"

Set RUST_LOG=console_session=debug to see raw responses.
"#
    );
}

fn parse_url(url: &str) -> ExitCode {
    match Request::new(Method::Get, url, HashMap::new()) {
        Ok(request) => {
            print!("{}", request);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to parse URL: {}", e);
            ExitCode::from(1)
        }
    }
}

fn connect(config_path: &str) -> Option<Session> {
    let config = match SessionConfig::from_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return None;
        }
    };

    let session = match Session::connect(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create session: {}", e);
            return None;
        }
    };

    if !session.is_authenticated() {
        if let Err(e) = session.login() {
            eprintln!("Login failed: {}", e);
            return None;
        }
    }

    Some(session)
}

fn login(config_path: &str) -> ExitCode {
    let Some(session) = connect(config_path) else {
        return ExitCode::from(1);
    };

    let cookies = session.cookies();
    println!("=== Session cookies ===");
    println!("amlbCookie: {}", cookies.amlb.as_deref().unwrap_or("-"));
    println!(
        "iPlanetDirectoryPro: {}",
        cookies.iplanet_directory_pro.as_deref().unwrap_or("-")
    );
    println!(
        "JSESSIONID: {}",
        cookies.console_jsessionid.as_deref().unwrap_or("-")
    );

    ExitCode::SUCCESS
}

fn get(config_path: &str, path: &str, query: Option<&str>) -> ExitCode {
    let Some(session) = connect(config_path) else {
        return ExitCode::from(1);
    };

    match session.get(path, query) {
        Ok(response) => {
            println!("Status: {}", response.status());
            println!("{}", response.body());
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}
