// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_models::notification::{
    BlockNotificationContext, HashMetaData, Notification, NotificationTrigger, TransactionHashPair,
};
use ledger_models::observer::{BlockTransactionObserver, BlockTransactionObserverAdapter};
use ledger_models::{Address, Block};

/// Drives a block forward or backward through a block observer.
///
/// Execute: transactions in order, then the fee credit and harvest reward of
/// `harvester`, then the confirmed hashes.
/// Undo: the harvest reward and the fee debit of `harvester`, then the confirmed
/// hashes, then the transactions in reverse order.
pub struct BlockProcessor<'a> {
    block: &'a Block,
    harvester: Address,
    context: BlockNotificationContext,
}

impl<'a> BlockProcessor<'a> {
    /// Processor for `block`, whose fees go to `harvester` (the forwarded account of its signer)
    pub fn new(block: &'a Block, harvester: Address, trigger: NotificationTrigger) -> Self {
        BlockProcessor {
            block,
            harvester,
            context: BlockNotificationContext::new(block.height(), block.timestamp(), trigger),
        }
    }

    /// Emits the notifications of the block pass to `observer`
    pub fn process(&self, observer: &mut dyn BlockTransactionObserver) {
        match self.context.trigger {
            NotificationTrigger::Execute => {
                self.process_transactions(observer);
                self.process_block(observer);
            }
            NotificationTrigger::Undo => {
                self.process_block(observer);
                self.process_transactions(observer);
            }
        }
    }

    fn process_transactions(&self, observer: &mut dyn BlockTransactionObserver) {
        let mut adapter = BlockTransactionObserverAdapter::new(observer, self.context);
        let transactions = &self.block.content.transactions;
        match self.context.trigger {
            NotificationTrigger::Execute => {
                for transaction in transactions {
                    transaction.execute(&mut adapter);
                }
            }
            NotificationTrigger::Undo => {
                for transaction in transactions.iter().rev() {
                    transaction.undo(&mut adapter);
                }
            }
        }
    }

    fn process_block(&self, observer: &mut dyn BlockTransactionObserver) {
        let fee = self.block.total_fee();
        let hashes = Notification::TransactionHashes {
            pairs: self
                .block
                .content
                .transactions
                .iter()
                .map(|transaction| TransactionHashPair {
                    hash: transaction.id,
                    meta_data: HashMetaData {
                        height: self.context.height,
                        timestamp: transaction.content.timestamp,
                    },
                })
                .collect(),
        };
        let reward = Notification::HarvestReward {
            account: self.harvester,
            amount: fee,
        };
        match self.context.trigger {
            NotificationTrigger::Execute => {
                let credit = Notification::BalanceCredit {
                    account: self.harvester,
                    amount: fee,
                };
                observer.notify(&credit, &self.context);
                observer.notify(&reward, &self.context);
                observer.notify(&hashes, &self.context);
            }
            NotificationTrigger::Undo => {
                let debit = Notification::BalanceDebit {
                    account: self.harvester,
                    amount: fee,
                };
                observer.notify(&reward, &self.context);
                observer.notify(&debit, &self.context);
                observer.notify(&hashes, &self.context);
            }
        }
    }
}
