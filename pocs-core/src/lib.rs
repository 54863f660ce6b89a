pub mod communes;
pub mod drawing;
pub mod hangman;
pub mod paging;
pub mod trees;
pub mod word_list;

pub use hangman::{Action, GuessError, HangmanSession, MAX_LIVES, apply, parse_letter};
pub use paging::{MAX_PAGES, PAGE_SIZE, PageRequest, page_count};
pub use word_list::{WordList, WordListError};
