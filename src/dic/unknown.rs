/*
 *  Copyright (c) 2021 Works Applications Co., Ltd.
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

use serde::Deserialize;
use serde_json::Value;

use crate::analysis::node::Node;
use crate::analysis::NodeSink;
use crate::dic::word_id::WordId;
use crate::error::WakachiResult;
use crate::input::InputText;

/// Unknown-word dictionary collaborator, queried after the known-word
/// lexicon at the same offset and through the same sink.
///
/// Contract: when `has_other_words` is false this provider MUST emit at
/// least one candidate. It is the sole mechanism keeping every
/// reachable boundary of the lattice non-empty; a violation surfaces as
/// a `LatticeDisconnect` error in the builder.
pub trait UnknownWordProvider: Sync + Send {
    fn provide(
        &self,
        input: &InputText,
        offset: usize,
        has_other_words: bool,
        sink: &mut dyn NodeSink,
    );
}

/// Provides an OOV node with a single char if no words were found in
/// the lexicon. Whitespace is reported as a transparent space node
/// covering the whole run.
#[derive(Debug)]
pub struct SimpleUnknownProvider {
    left_id: u16,
    right_id: u16,
    cost: i16,
}

impl Default for SimpleUnknownProvider {
    fn default() -> Self {
        SimpleUnknownProvider {
            left_id: 1,
            right_id: 1,
            cost: 10000,
        }
    }
}

/// Struct corresponds with raw config json file.
#[allow(non_snake_case)]
#[derive(Deserialize)]
struct ProviderSettings {
    leftId: u16,
    rightId: u16,
    cost: i16,
}

impl SimpleUnknownProvider {
    pub fn new(left_id: u16, right_id: u16, cost: i16) -> SimpleUnknownProvider {
        SimpleUnknownProvider {
            left_id,
            right_id,
            cost,
        }
    }

    pub fn left_id(&self) -> u16 {
        self.left_id
    }

    pub fn right_id(&self) -> u16 {
        self.right_id
    }

    /// Loads connection parameters from a settings object
    pub fn set_up(&mut self, settings: &Value) -> WakachiResult<()> {
        let settings: ProviderSettings = serde_json::from_value(settings.clone())?;
        self.left_id = settings.leftId;
        self.right_id = settings.rightId;
        self.cost = settings.cost;
        Ok(())
    }
}

impl UnknownWordProvider for SimpleUnknownProvider {
    fn provide(
        &self,
        input: &InputText,
        offset: usize,
        has_other_words: bool,
        sink: &mut dyn NodeSink,
    ) {
        let c = match input.char_at(offset) {
            Some(c) => c,
            None => return,
        };

        if c.is_whitespace() {
            let run = input
                .suffix(offset)
                .chars()
                .take_while(|c| c.is_whitespace())
                .count();
            sink.accept(Node::space(offset as u16, (offset + run) as u16));
            return;
        }

        if has_other_words {
            return;
        }

        sink.accept(Node::new(
            offset as u16,
            (offset + 1) as u16,
            self.left_id,
            self.right_id,
            self.cost,
            WordId::oov(0),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::node::{LatticeNode, RightId};
    use serde_json::json;

    fn collect(text: &str, offset: usize, has_other_words: bool) -> Vec<Node> {
        struct Collect(Vec<Node>);
        impl NodeSink for Collect {
            fn accept(&mut self, node: Node) {
                self.0.push(node);
            }
        }
        let provider = SimpleUnknownProvider::default();
        let input = InputText::new(text);
        let mut sink = Collect(Vec::new());
        provider.provide(&input, offset, has_other_words, &mut sink);
        sink.0
    }

    #[test]
    fn fallback_only_without_other_words() {
        let nodes = collect("abc", 1, true);
        assert!(nodes.is_empty());

        let nodes = collect("abc", 1, false);
        assert_eq!(1, nodes.len());
        assert_eq!(1..2, nodes[0].char_range());
        assert!(nodes[0].is_oov());
        assert!(!nodes[0].is_space());
    }

    #[test]
    fn whitespace_run_becomes_one_space_node() {
        let nodes = collect("a \t b", 1, false);
        assert_eq!(1, nodes.len());
        assert!(nodes[0].is_space());
        assert_eq!(1..4, nodes[0].char_range());
    }

    #[test]
    fn space_is_reported_even_with_other_words() {
        let nodes = collect(" a", 0, true);
        assert_eq!(1, nodes.len());
        assert!(nodes[0].is_space());
    }

    #[test]
    fn set_up_reads_settings() {
        let mut provider = SimpleUnknownProvider::default();
        provider
            .set_up(&json!({"leftId": 3, "rightId": 4, "cost": 1500}))
            .expect("settings rejected");
        let input = InputText::new("x");
        struct Collect(Vec<Node>);
        impl NodeSink for Collect {
            fn accept(&mut self, node: Node) {
                self.0.push(node);
            }
        }
        let mut sink = Collect(Vec::new());
        provider.provide(&input, 0, false, &mut sink);
        assert_eq!(3, sink.0[0].left_id());
        assert_eq!(4, sink.0[0].right_id());
        assert_eq!(1500, sink.0[0].cost());

        let bad = provider.set_up(&json!({"leftId": "x"}));
        assert!(bad.is_err());
    }
}
