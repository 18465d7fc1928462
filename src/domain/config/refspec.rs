// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::infrastructure::git::GitRemote;
use crate::shared::error::Result;

/// A source repository plus the branch/ref to build from. Immutable once
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRefspec {
    pub url: String,
    pub reference: String,
}

impl GitRefspec {
    /// Resolve a compact `URL[@REF]` refspec.
    ///
    /// `URL@REF` splits on the first `@` and never touches the network; a
    /// bare URL asks the remote for its default branch.
    pub async fn resolve(refspec: &str, remote: &dyn GitRemote) -> Result<Self> {
        match refspec.split_once('@') {
            Some((url, reference)) => Ok(Self {
                url: url.to_string(),
                reference: reference.to_string(),
            }),
            None => {
                let reference = remote.default_branch(refspec).await?;
                Ok(Self {
                    url: refspec.to_string(),
                    reference,
                })
            }
        }
    }
}
