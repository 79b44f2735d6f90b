//! Shared test harness modules for the campsite CLI.

use super::*;
use crate::generate::{GenerateConfig, Selection, export};
