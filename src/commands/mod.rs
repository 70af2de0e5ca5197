// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod init;
pub mod dashboard;
pub mod reports;
pub mod finance;
pub mod tasks;
pub mod users;
pub mod settings;
pub mod exporter;
pub mod sync;
