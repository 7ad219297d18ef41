// MINUET: Offline Analysis of Vehicular Clustering and Relay-Election Simulation Logs
// Copyright (C) 2024-2025 The MINUET authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! (De-)serialize maps with non-string keys (e.g., tuples) as a list of `{key, val}` entries.
//!
//! Use with `#[serde(with = "crate::serde_map")]` on a `BTreeMap`. Entries are written in key
//! order.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize, Serialize)]
struct Entry<K, V> {
    key: K,
    val: V,
}

pub fn serialize<K: Serialize, V: Serialize, S: Serializer>(
    map: &BTreeMap<K, V>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(map.iter().map(|(key, val)| Entry { key, val }))
}

pub fn deserialize<'de, K: Deserialize<'de> + Ord, V: Deserialize<'de>, D>(
    deserializer: D,
) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Entry<K, V>>::deserialize(deserializer)
        .map(|v| v.into_iter().map(|e| (e.key, e.val)).collect())
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Flows {
        #[serde(with = "crate::serde_map")]
        flows: BTreeMap<(u32, u32), usize>,
    }

    #[test]
    fn tuple_keys() {
        let flows = Flows {
            flows: BTreeMap::from([((101, 205), 3), ((102, 205), 1)]),
        };
        let json = serde_json::to_string(&flows).unwrap();
        assert_eq!(
            json,
            r#"{"flows":[{"key":[101,205],"val":3},{"key":[102,205],"val":1}]}"#
        );
        assert_eq!(serde_json::from_str::<Flows>(&json).unwrap(), flows);
    }
}
