use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{NodeId, Taxonomy};

// Stored form is the nested object tree `{"Computers": {"Shell": {}}}`.
// Key order follows child creation order on the way out and document order
// on the way in.

struct Subtree<'a> {
    taxonomy: &'a Taxonomy,
    id: NodeId,
}

impl Serialize for Subtree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.taxonomy.child_ids(self.id);
        let mut map = serializer.serialize_map(Some(children.len()))?;
        for child in children {
            let Some(keyword) = self.taxonomy.keyword(*child) else {
                continue;
            };
            map.serialize_entry(
                keyword,
                &Subtree {
                    taxonomy: self.taxonomy,
                    id: *child,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for Taxonomy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Subtree {
            taxonomy: self,
            id: NodeId::ROOT,
        }
        .serialize(serializer)
    }
}

struct KeywordTree(Vec<(String, KeywordTree)>);

impl<'de> Deserialize<'de> for KeywordTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeywordTreeVisitor)
    }
}

struct KeywordTreeVisitor;

impl<'de> Visitor<'de> for KeywordTreeVisitor {
    type Value = KeywordTree;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a nested keyword -> subtree object")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((keyword, subtree)) = access.next_entry::<String, KeywordTree>()? {
            entries.push((keyword, subtree));
        }
        Ok(KeywordTree(entries))
    }
}

impl Taxonomy {
    fn graft(&mut self, parent: NodeId, tree: KeywordTree) {
        for (keyword, subtree) in tree.0 {
            let id = self.ensure_child(parent, &keyword);
            self.graft(id, subtree);
        }
    }
}

impl<'de> Deserialize<'de> for Taxonomy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tree = KeywordTree::deserialize(deserializer)?;
        let mut taxonomy = Self::new();
        taxonomy.graft(NodeId::ROOT, tree);
        Ok(taxonomy)
    }
}
