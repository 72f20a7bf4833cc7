// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

pub mod helpers;
pub mod mock_server;
