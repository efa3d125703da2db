#![warn(clippy::all)]

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use tokio::io::{AsyncBufReadExt, BufReader};

use trivia::Error;
use trivia::TriviaClient;
use trivia::components::card::{QuestionAction, QuestionCard};
use trivia::components::form::{
    FIELD_ANSWER, FIELD_CATEGORY, FIELD_DIFFICULTY, FIELD_QUESTION, QuestionForm,
};
use trivia::config::{Config, Overrides};
use trivia::types::category::{Category, CategoryId};
use trivia::types::question::{Question, QuestionId};
use trivia::types::quiz::{ANY_CATEGORY, QuizCategory};

/// Number of questions in one quiz round.
const QUESTIONS_PER_PLAY: usize = 5;

/// Terminal front end for the trivia API
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    #[clap(flatten)]
    overrides: Overrides,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the categories
    Categories,
    /// List questions, newest first
    List {
        #[clap(long, default_value = "1")]
        page: usize,
        /// Reveal the answers
        #[clap(long)]
        answers: bool,
    },
    /// List the questions of one category
    Category {
        id: i32,
        #[clap(long, default_value = "1")]
        page: usize,
    },
    /// Search question texts
    Search {
        term: String,
        #[clap(long, default_value = "1")]
        page: usize,
    },
    /// Add a new trivia question
    Add {
        #[clap(long)]
        question: String,
        #[clap(long)]
        answer: String,
        #[clap(long, default_value = "1")]
        difficulty: String,
        #[clap(long, default_value = "1")]
        category: String,
    },
    /// Delete a question listed on the given page
    Delete {
        id: i32,
        #[clap(long, default_value = "1")]
        page: usize,
    },
    /// Play a quiz round, 0 picks any category
    Play {
        #[clap(long, default_value = "0")]
        category: i32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = Config::load(&cli.overrides)?;

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned()))
        .with_writer(std::io::stderr)
        .init();

    let client = TriviaClient::from_config(&config)?;
    match cli.command {
        Command::Categories => {
            for category in client.get_categories().await? {
                println!("{:>3}  {}", category.id.0, category.kind);
            }
        }
        Command::List { page, answers } => {
            let res = client.get_questions(page).await?;
            let categories = index_categories(client.get_categories().await?);
            println!("{} questions in total", res.total_questions);
            for question in res.questions {
                let mut card = card_for(question, &categories);
                if answers {
                    card.flip_visibility();
                }
                println!("\n{}", card.render());
            }
        }
        Command::Category { id, page } => {
            let res = client.get_category_questions(CategoryId(id), page).await?;
            let categories = index_categories(res.categories);
            println!(
                "{}: {} questions",
                res.current_category.kind, res.total_questions
            );
            for question in res.questions {
                println!("\n{}", card_for(question, &categories).render());
            }
        }
        Command::Search { term, page } => {
            let res = client.search_questions(&term, page).await?;
            let categories = index_categories(client.get_categories().await?);
            println!("{} matches", res.total_questions);
            for question in res.questions {
                println!("\n{}", card_for(question, &categories).render());
            }
        }
        Command::Add {
            question,
            answer,
            difficulty,
            category,
        } => {
            let mut form = QuestionForm::new();
            if let Err(notice) = form.mount(&client).await {
                eprintln!("{}", notice);
                return Err(notice.source);
            }
            form.handle_change(FIELD_QUESTION, &question)?;
            form.handle_change(FIELD_ANSWER, &answer)?;
            form.handle_change(FIELD_DIFFICULTY, &difficulty)?;
            form.handle_change(FIELD_CATEGORY, &category)?;

            let draft = form.draft();
            let stars = QuestionForm::difficulty_options()
                .into_iter()
                .find(|(level, _)| *level == draft.difficulty)
                .map_or_else(|| draft.difficulty.to_string(), |(_, stars)| stars);
            let kind = form
                .category_options()
                .into_iter()
                .find(|(id, _)| *id == draft.category)
                .map_or("unknown category", |(_, kind)| kind);
            println!("Adding \"{}\" [{}] {}", draft.question, kind, stars);
            if let Err(notice) = form.submit(&client).await {
                eprintln!("{}", notice);
                return Err(notice.source);
            }
            println!("Question added");
        }
        Command::Delete { id, page } => {
            let res = client.get_questions(page).await?;
            let categories = index_categories(client.get_categories().await?);
            let card = res
                .questions
                .into_iter()
                .find(|q| q.id == QuestionId(id))
                .map(|q| card_for(q, &categories))
                .ok_or(Error::QuestionNotFound(id))?;
            let deleted = card
                .delete(|action| question_action(&client, card.id(), action))
                .await?;
            println!("Question {} deleted, {} left", id, deleted);
        }
        Command::Play { category } => {
            play(&client, category).await?;
        }
    }

    Ok(())
}

fn index_categories(categories: Vec<Category>) -> HashMap<CategoryId, Category> {
    categories.into_iter().map(|c| (c.id, c)).collect()
}

fn card_for(question: Question, categories: &HashMap<CategoryId, Category>) -> QuestionCard {
    let category = categories
        .get(&question.category)
        .cloned()
        .unwrap_or_else(|| Category {
            id: question.category,
            kind: "Unknown".to_string(),
        });
    QuestionCard::new(question, category)
}

/// Owner side of the card's action callback. Returns how many questions remain.
async fn question_action(
    client: &TriviaClient,
    id: QuestionId,
    action: QuestionAction,
) -> Result<usize, Error> {
    match action {
        QuestionAction::Delete => {
            let res = client.delete_question(id).await?;
            Ok(res.total_questions)
        }
    }
}

async fn play(client: &TriviaClient, category: i32) -> Result<(), Error> {
    let categories = index_categories(client.get_categories().await?);
    let quiz_category = QuizCategory {
        id: CategoryId(category),
        kind: categories.get(&CategoryId(category)).map(|c| c.kind.clone()),
    };
    if quiz_category.id != ANY_CATEGORY && quiz_category.kind.is_none() {
        return Err(Error::CategoryNotFound(category));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut previous = Vec::new();
    let mut score = 0;

    while previous.len() < QUESTIONS_PER_PLAY {
        let question = match client
            .next_quiz_question(quiz_category.clone(), &previous)
            .await?
        {
            Some(question) => question,
            None => break,
        };
        previous.push(question.id);

        let mut card = card_for(question, &categories);
        println!("\n{}", card.render());
        println!("Your answer:");
        let guess = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => break,
        };

        card.flip_visibility();
        if guess.trim().eq_ignore_ascii_case(card.question().answer.trim()) {
            score += 1;
            println!("Correct!");
        } else {
            println!("{}", card.render());
        }
    }

    println!("\nYou scored {} out of {}", score, previous.len());
    Ok(())
}
