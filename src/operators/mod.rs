//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Operators Module
//!
//! Record-level operators built on the token augmenters.
//!
//! - **augment**: random deletion, insertion and swap over a tokenized field
//! - **field**: dotted field paths into record payloads and metadata
//!
//! Operators are typically created through factory functions or the
//! [`ZiOperatorRegistry`](crate::registry::ZiOperatorRegistry) and applied to
//! record batches through the [`ZiOperator`](crate::operator::ZiOperator) trait.

pub mod augment;
pub mod field;
